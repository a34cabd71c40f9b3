use super::error::RouteError;
use super::paths::ShortestPathEngine;
use super::types::{Dpid, PortNo};

use serde::{Deserialize, Serialize};

/// One switch traversal of a forwarding route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub in_port: PortNo,
    pub dpid: Dpid,
    pub out_port: PortNo,
}

impl Hop {
    pub fn new(in_port: PortNo, dpid: Dpid, out_port: PortNo) -> Self {
        Self {
            in_port,
            dpid,
            out_port,
        }
    }
}

pub type Route = Vec<Hop>;

/// Resolves switch paths from a [`ShortestPathEngine`] into port-level routes.
pub struct RouteBuilder<'a> {
    engine: &'a ShortestPathEngine,
}

impl<'a> RouteBuilder<'a> {
    pub fn new(engine: &'a ShortestPathEngine) -> Self {
        Self { engine }
    }

    /// Route from `port_in` on `dpid_in` to `port_out` on `dpid_out`.
    ///
    /// The out port of each hop and the in port of the following hop come
    /// from the same physical link, so consecutive hops are always wired
    /// together in the topology.
    pub fn get_route(
        &self,
        dpid_in: Dpid,
        port_in: PortNo,
        dpid_out: Dpid,
        port_out: PortNo,
    ) -> Result<Route, RouteError> {
        if dpid_in == dpid_out {
            return Ok(vec![Hop::new(port_in, dpid_in, port_out)]);
        }

        let path = self
            .engine
            .path_to(dpid_in, dpid_out)
            .map_err(|source| RouteError::NoRouteFound {
                src: dpid_in,
                dst: dpid_out,
                source,
            })?;

        let topology = self.engine.topology();
        let mut route = Vec::with_capacity(path.len());
        let mut in_port = port_in;

        for pair in path.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let link = topology
                .link_towards(current, next)
                .ok_or(RouteError::PortResolution {
                    from: current,
                    to: next,
                })?;
            route.push(Hop::new(in_port, current, link.src.port));
            in_port = link.dst.port;
        }
        route.push(Hop::new(in_port, dpid_out, port_out));

        tracing::debug!(
            "Route {}/{} -> {}/{}: {} hops",
            dpid_in,
            port_in,
            dpid_out,
            port_out,
            route.len()
        );

        Ok(route)
    }
}
