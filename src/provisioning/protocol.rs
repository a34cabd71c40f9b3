//! Provisioning API Protocol
//!
//! Method names served by the planner and the Data Transfer Objects carried
//! in their `params` and `result` members.

use crate::controller::client::{SwitchId, TenantId};
use crate::topology::route::Route;
use crate::topology::types::{Dpid, PortNo};
use serde::{Deserialize, Serialize};

// --- Methods ---

/// Builds and starts a tenant virtual network.
pub const METHOD_CREATE_NETWORK: &str = "createNetwork";
/// Computes a port-level route on the current topology snapshot.
pub const METHOD_GET_ROUTE: &str = "getRoute";
/// Re-reads the physical topology from the controller.
pub const METHOD_REFRESH_TOPOLOGY: &str = "refreshTopology";

// --- Data Transfer Objects ---

/// Tenant network settings, forwarded to the controller's `createNetwork`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    /// `bigswitch`, `physical` or `custom`.
    #[serde(rename = "type")]
    pub network_type: String,
    /// Protocol used to reach the tenant's own controller (e.g. `tcp`).
    pub protocol: String,
    /// Address of the tenant's controller.
    pub controller_address: String,
    pub controller_port: u16,
    /// Tenant address space, e.g. `10.0.0.0/16`.
    pub subnet: String,
}

/// A host attached to a physical switch port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSpec {
    pub dpid: Dpid,
    pub port_number: PortNo,
    pub mac: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNetworkParams {
    pub network: NetworkSpec,
    #[serde(default)]
    pub hosts: Vec<HostSpec>,
}

/// Result of a completed `createNetwork` workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummary {
    pub tenant_id: TenantId,
    pub mode: String,
    pub switch_ids: Vec<SwitchId>,
    pub hosts: usize,
    pub routes: usize,
    pub links: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRouteParams {
    pub dpid_in: Dpid,
    pub port_in: PortNo,
    pub dpid_out: Dpid,
    pub port_out: PortNo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRouteResponse {
    /// Generation of the snapshot the route was computed on.
    pub snapshot: u64,
    pub route: Route,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTopologyResponse {
    pub snapshot: u64,
    pub switches: usize,
    pub links: usize,
}
