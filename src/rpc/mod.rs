//! JSON-RPC Request Dispatcher
//!
//! Protocol-only layer: it knows how to read a JSON-RPC 2.0 request, find the
//! handler registered for its method and wrap whatever comes back into a
//! response. It knows nothing about topologies or tenants.
//!
//! ## Submodules
//! - **`protocol`**: Envelope types and the fixed error codes.
//! - **`registry`**: The startup-built method-name → handler table.
//! - **`dispatcher`**: Request validation, lookup, invocation, response building.
//! - **`handlers`**: The axum route that feeds HTTP bodies into the dispatcher.

pub mod dispatcher;
pub mod handlers;
pub mod protocol;
pub mod registry;

#[cfg(test)]
mod tests;
