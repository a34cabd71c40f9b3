use super::error::RouteError;
use super::graph::Topology;
use super::paths::ShortestPathEngine;
use super::route::{Route, RouteBuilder};
use super::types::{Dpid, PortNo};

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A topology together with the path cache computed against it.
pub struct RoutingSnapshot {
    generation: u64,
    engine: ShortestPathEngine,
}

impl RoutingSnapshot {
    /// Wraps `topology` with an empty path cache.
    pub fn new(generation: u64, topology: Topology) -> Self {
        Self {
            generation,
            engine: ShortestPathEngine::new(Arc::new(topology)),
        }
    }

    /// Install counter of the owning cache; later snapshots have larger values.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The graph this snapshot routes over.
    pub fn topology(&self) -> &Topology {
        self.engine.topology()
    }

    /// The path engine, with whatever trees have been computed so far.
    pub fn engine(&self) -> &ShortestPathEngine {
        &self.engine
    }

    /// Port-level route from `port_in` on `dpid_in` to `port_out` on `dpid_out`.
    ///
    /// # Returns
    /// * `Ok(route)` with one hop per switch on the shortest path.
    /// * `Err(RouteError::NoRouteFound)` if either switch is unknown or unreachable.
    /// * `Err(RouteError::PortResolution)` if two consecutive switches share no link.
    pub fn get_route(
        &self,
        dpid_in: Dpid,
        port_in: PortNo,
        dpid_out: Dpid,
        port_out: PortNo,
    ) -> Result<Route, RouteError> {
        RouteBuilder::new(&self.engine).get_route(dpid_in, port_in, dpid_out, port_out)
    }
}

/// Holds the current routing snapshot.
///
/// Installing a topology swaps in a whole new snapshot (and with it an empty
/// path cache). Callers holding an `Arc` from an earlier `current()` keep
/// computing against the snapshot they started with.
#[derive(Default)]
pub struct TopologyCache {
    current: ArcSwapOption<RoutingSnapshot>,
    generation: AtomicU64,
}

impl TopologyCache {
    /// Creates an empty cache; `current()` is `None` until the first install.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Publishes `topology` as the current snapshot.
    ///
    /// Generations start at 1 and increase by one per install.
    ///
    /// # Returns
    /// The installed snapshot, so the caller can keep working on exactly it.
    pub fn install(&self, topology: Topology) -> Arc<RoutingSnapshot> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(RoutingSnapshot::new(generation, topology));

        tracing::info!(
            "Installed topology snapshot #{} ({} switches, {} links)",
            generation,
            snapshot.topology().switch_count(),
            snapshot.topology().link_count()
        );

        self.current.store(Some(snapshot.clone()));
        snapshot
    }

    /// The most recently installed snapshot, if any.
    pub fn current(&self) -> Option<Arc<RoutingSnapshot>> {
        self.current.load_full()
    }
}
