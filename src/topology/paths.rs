//! Minimum-hop path search with a per-source cache.
//!
//! All links are unweighted, so a breadth-first search from a source yields
//! a predecessor tree holding a shortest path to every reachable switch. Trees
//! are computed lazily, at most once per source, and live as long as the
//! engine, which in turn lives exactly as long as its topology snapshot.
//!
//! Among equal-length paths the winner is fixed by visiting neighbours in
//! ascending dpid order: the first switch to discover a node becomes its
//! predecessor.

use super::error::TopologyError;
use super::graph::Topology;
use super::types::Dpid;

use dashmap::DashMap;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// BFS result for one source switch.
#[derive(Debug, Clone)]
pub struct PredecessorTree {
    src: Dpid,
    predecessors: HashMap<Dpid, Dpid>,
}

impl PredecessorTree {
    fn search(topology: &Topology, src: Dpid) -> Self {
        let mut predecessors = HashMap::new();
        let mut queue = VecDeque::from([src]);

        while let Some(current) = queue.pop_front() {
            for &next in topology.neighbours(current) {
                if next == src || predecessors.contains_key(&next) {
                    continue;
                }
                predecessors.insert(next, current);
                queue.push_back(next);
            }
        }

        Self { src, predecessors }
    }

    pub fn src(&self) -> Dpid {
        self.src
    }

    /// Whether `dst` is the source or was discovered by the search.
    pub fn reaches(&self, dst: Dpid) -> bool {
        dst == self.src || self.predecessors.contains_key(&dst)
    }

    /// Number of switches reachable from the source, the source included.
    pub fn reachable_count(&self) -> usize {
        self.predecessors.len() + 1
    }

    /// Ordered switch sequence `[src, .., dst]`, or `None` if unreachable.
    pub fn path_to(&self, dst: Dpid) -> Option<Vec<Dpid>> {
        if !self.reaches(dst) {
            return None;
        }

        let mut path = vec![dst];
        let mut current = dst;
        while current != self.src {
            current = self.predecessors[&current];
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Shortest paths over one topology snapshot, cached per source switch.
pub struct ShortestPathEngine {
    topology: Arc<Topology>,
    trees: DashMap<Dpid, Arc<OnceLock<Arc<PredecessorTree>>>>,
    computations: AtomicUsize,
}

impl ShortestPathEngine {
    pub fn new(topology: Arc<Topology>) -> Self {
        Self {
            topology,
            trees: DashMap::new(),
            computations: AtomicUsize::new(0),
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the predecessor tree rooted at `src`, running the search on
    /// first use. Concurrent callers for the same source wait for a single
    /// computation instead of repeating it.
    pub fn compute_from(&self, src: Dpid) -> Result<Arc<PredecessorTree>, TopologyError> {
        if !self.topology.contains(src) {
            return Err(TopologyError::UnknownSwitch(src));
        }

        // Clone the cell out so the map shard is not locked during the search.
        let cell = self.trees.entry(src).or_default().value().clone();
        let tree = cell.get_or_init(|| {
            self.computations.fetch_add(1, Ordering::SeqCst);
            let tree = PredecessorTree::search(&self.topology, src);
            tracing::debug!(
                "Computed shortest-path tree from switch {} ({} reachable)",
                src,
                tree.reachable_count()
            );
            Arc::new(tree)
        });

        Ok(tree.clone())
    }

    /// Minimum-hop switch sequence `[src, .., dst]`.
    ///
    /// # Returns
    /// * `Err(TopologyError::UnknownSwitch)` if either end is not in the topology.
    /// * `Err(TopologyError::DisconnectedGraph)` if `dst` cannot be reached from `src`.
    pub fn path_to(&self, src: Dpid, dst: Dpid) -> Result<Vec<Dpid>, TopologyError> {
        if !self.topology.contains(dst) {
            return Err(TopologyError::UnknownSwitch(dst));
        }

        self.compute_from(src)?
            .path_to(dst)
            .ok_or(TopologyError::DisconnectedGraph { src, dst })
    }

    /// Number of sources with a cached tree.
    pub fn cached_sources(&self) -> usize {
        self.trees.len()
    }

    /// Number of breadth-first searches run so far.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::SeqCst)
    }
}
