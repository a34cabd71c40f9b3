//! Virtual Network Provisioning
//!
//! Turns a `createNetwork` request into the ordered series of controller calls
//! that builds a tenant's virtual network on top of the physical topology.
//!
//! ## Network Modes
//! - **`bigswitch`**: One virtual switch spanning every physical switch. The
//!   planner computes a forward and a reverse route for every host pair and
//!   installs them on that switch.
//! - **`physical`**: A 1:1 clone of the physical network, one virtual switch per
//!   dpid and one virtual link per physical link.
//! - **`custom`**: Rejected as unsupported.
//!
//! ## Submodules
//! - **`orchestrator`**: The step-by-step workflows.
//! - **`handlers`**: JSON-RPC method handlers wired into the dispatcher.
//! - **`protocol`**: Method names and request/response DTOs.
//! - **`types`**: Network modes, workflow steps, per-request context.
//! - **`error`**: Workflow failures and their JSON-RPC error mapping.

pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod protocol;
pub mod types;
