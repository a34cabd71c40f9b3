use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port number, scoped to the switch that owns it.
pub type PortNo = u16;

/// Datapath identifier of a physical switch.
///
/// Controllers report dpids either as plain integers or in the OpenFlow
/// colon-separated hex form (`00:00:00:00:00:00:00:01`); both decode to the
/// same value. Serialization always uses the integer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DpidRepr", into = "u64")]
pub struct Dpid(pub u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum DpidRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<DpidRepr> for Dpid {
    type Error = String;

    fn try_from(repr: DpidRepr) -> Result<Self, Self::Error> {
        match repr {
            DpidRepr::Number(value) => Ok(Dpid(value)),
            DpidRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Dpid> for u64 {
    fn from(dpid: Dpid) -> Self {
        dpid.0
    }
}

impl FromStr for Dpid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(':') {
            let hex: String = s.split(':').collect();
            if hex.is_empty() || hex.len() > 16 {
                return Err(format!("invalid dpid '{}'", s));
            }
            u64::from_str_radix(&hex, 16)
                .map(Dpid)
                .map_err(|e| format!("invalid dpid '{}': {}", s, e))
        } else {
            s.parse::<u64>()
                .map(Dpid)
                .map_err(|e| format!("invalid dpid '{}': {}", s, e))
        }
    }
}

impl fmt::Display for Dpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (switch, port) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub dpid: Dpid,
    pub port: PortNo,
}

impl Endpoint {
    pub fn new(dpid: Dpid, port: PortNo) -> Self {
        Self { dpid, port }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dpid, self.port)
    }
}

/// A directed physical link between two switch ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub src: Endpoint,
    pub dst: Endpoint,
}

impl Link {
    pub fn new(src: Endpoint, dst: Endpoint) -> Self {
        Self { src, dst }
    }

    /// Path string understood by the controller's link API:
    /// `<srcDpid>/<srcPort>-<dstDpid>/<dstPort>`.
    pub fn path_string(&self) -> String {
        format!("{}-{}", self.src, self.dst)
    }
}

/// Raw topology as reported by the controller, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyDescription {
    pub switches: Vec<Dpid>,
    #[serde(default)]
    pub links: Vec<Link>,
}
