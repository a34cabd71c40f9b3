use super::types::{Dpid, Endpoint};
use thiserror::Error;

/// Failures of the graph model and the shortest-path engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("malformed topology: {0}")]
    MalformedTopology(String),
    #[error("switch {0} is not part of the topology")]
    UnknownSwitch(Dpid),
    #[error("switch {dst} is not reachable from switch {src}")]
    DisconnectedGraph { src: Dpid, dst: Dpid },
}

impl TopologyError {
    pub(crate) fn duplicate_source(src: Endpoint, first: Endpoint, second: Endpoint) -> Self {
        Self::MalformedTopology(format!(
            "port {} is the source of two links (to {} and to {})",
            src, first, second
        ))
    }

    pub(crate) fn undeclared_switch(endpoint: Endpoint) -> Self {
        Self::MalformedTopology(format!(
            "link endpoint {} references undeclared switch {}",
            endpoint, endpoint.dpid
        ))
    }
}

/// Failures while turning a switch path into a port-resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route found from switch {src} to switch {dst}: {source}")]
    NoRouteFound {
        src: Dpid,
        dst: Dpid,
        #[source]
        source: TopologyError,
    },
    /// The snapshot lacks a link for a path it produced itself.
    #[error("no link from switch {from} towards switch {to} in the topology snapshot")]
    PortResolution { from: Dpid, to: Dpid },
}
