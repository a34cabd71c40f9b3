//! OpenVirteX Network Planner Library
//!
//! Plans tenant virtual networks on top of a physical SDN topology and
//! provisions them through the OpenVirteX controller. The binary (`main.rs`)
//! exposes the planner as a JSON-RPC 2.0 service over HTTP.
//!
//! ## Architecture Modules
//! - **`topology`**: The routing engine. Immutable graph snapshots, cached
//!   breadth-first shortest paths and port-resolved forwarding routes.
//! - **`rpc`**: The JSON-RPC 2.0 layer. Envelope parsing, the startup-built
//!   method table and error/response construction.
//! - **`controller`**: Client side of the virtualization controller API.
//! - **`provisioning`**: The network-creation workflows (big switch, physical
//!   clone) that tie the routing engine to controller calls.
//! - **`config`**: Command line and environment settings.

pub mod config;
pub mod controller;
pub mod provisioning;
pub mod rpc;
pub mod topology;
