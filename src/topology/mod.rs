//! Topology Routing Engine
//!
//! Everything the planner knows about the physical network, and how it finds
//! its way through it.
//!
//! ## Pipeline
//! 1. **Graph**: `Topology::build` validates the controller's switch/link lists
//!    into an immutable graph.
//! 2. **Paths**: `ShortestPathEngine` runs breadth-first searches per source and
//!    caches the resulting predecessor trees.
//! 3. **Routes**: `RouteBuilder` turns a switch path into `(inPort, dpid, outPort)`
//!    hops by resolving the ports of the links between consecutive switches.
//! 4. **Snapshots**: `TopologyCache` publishes the current graph and its path
//!    cache as one atomically replaceable unit.

pub mod error;
pub mod graph;
pub mod paths;
pub mod route;
pub mod snapshot;
pub mod types;
