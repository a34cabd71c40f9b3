//! Virtualization Controller Client
//!
//! The planner does not build virtual networks itself; it asks the
//! OpenVirteX controller to do so. This module defines the calls it needs
//! (`ControllerClient`) and an HTTP implementation speaking the controller's
//! JSON-RPC API.

pub mod client;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;
