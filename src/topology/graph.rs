//! Physical Topology Graph
//!
//! Immutable view of the physical switches and the directed links between
//! their ports. A `Topology` is validated once at construction and never
//! mutated afterwards; refreshing the network view means building a new one.

use super::error::TopologyError;
use super::types::*;

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct Topology {
    switches: BTreeSet<Dpid>,
    /// Keyed by source endpoint, so every port originates at most one link.
    links: BTreeMap<Endpoint, Link>,
    /// Distinct next-hop switches per switch, ascending.
    adjacency: BTreeMap<Dpid, Vec<Dpid>>,
}

impl Topology {
    /// Validates a controller-provided description and builds the graph.
    ///
    /// Repeated switch ids and repeated identical links are collapsed. A port
    /// that is the source of two different links, or a link touching a switch
    /// that was not declared, makes the whole description invalid.
    pub fn build(description: &TopologyDescription) -> Result<Self, TopologyError> {
        let switches: BTreeSet<Dpid> = description.switches.iter().copied().collect();

        let mut links: BTreeMap<Endpoint, Link> = BTreeMap::new();
        for link in &description.links {
            for endpoint in [link.src, link.dst] {
                if !switches.contains(&endpoint.dpid) {
                    return Err(TopologyError::undeclared_switch(endpoint));
                }
            }

            match links.get(&link.src) {
                Some(existing) if existing.dst == link.dst => {
                    tracing::debug!("Ignoring repeated link {}", link.path_string());
                }
                Some(existing) => {
                    return Err(TopologyError::duplicate_source(
                        link.src,
                        existing.dst,
                        link.dst,
                    ));
                }
                None => {
                    links.insert(link.src, *link);
                }
            }
        }

        let mut adjacency: BTreeMap<Dpid, BTreeSet<Dpid>> =
            switches.iter().map(|dpid| (*dpid, BTreeSet::new())).collect();
        for link in links.values() {
            adjacency
                .entry(link.src.dpid)
                .or_default()
                .insert(link.dst.dpid);
        }

        Ok(Self {
            switches,
            links,
            adjacency: adjacency
                .into_iter()
                .map(|(dpid, next)| (dpid, next.into_iter().collect()))
                .collect(),
        })
    }

    /// Switches reachable from `node` over exactly one outgoing link,
    /// deduplicated and in ascending dpid order.
    pub fn neighbours(&self, node: Dpid) -> &[Dpid] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The link originating at `port` on `node`, if any.
    pub fn find_link(&self, node: Dpid, port: PortNo) -> Option<&Link> {
        self.links.get(&Endpoint::new(node, port))
    }

    /// The link with the lowest source port on `from` that lands on `to`.
    pub fn link_towards(&self, from: Dpid, to: Dpid) -> Option<&Link> {
        self.links
            .range(Endpoint::new(from, PortNo::MIN)..=Endpoint::new(from, PortNo::MAX))
            .map(|(_, link)| link)
            .find(|link| link.dst.dpid == to)
    }

    /// Whether `node` was declared by the controller.
    pub fn contains(&self, node: Dpid) -> bool {
        self.switches.contains(&node)
    }

    /// Declared switches in ascending dpid order.
    pub fn switches(&self) -> impl Iterator<Item = Dpid> + '_ {
        self.switches.iter().copied()
    }

    /// Directed links ordered by source endpoint (dpid, then port).
    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.values()
    }

    /// Number of distinct switches.
    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    /// Number of distinct directed links. A bidirectional cable counts twice.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
