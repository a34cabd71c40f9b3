use crate::rpc::protocol::RpcError;
use crate::topology::route::Route;
use crate::topology::types::{Dpid, PortNo, TopologyDescription};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier the controller assigns to a tenant network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub u64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Virtual dpid of a switch created inside a tenant network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchId(pub u64);

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("controller unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("controller answered {method} with HTTP {status}")]
    Status { method: String, status: u16 },
    #[error("controller rejected {method}: {error}")]
    Rpc { method: String, error: RpcError },
    #[error("unexpected controller reply to {method}: {reason}")]
    Decode { method: String, reason: String },
}

/// Calls the planner makes against the network-virtualization controller.
///
/// Every call is a single attempt; timeouts belong to the implementation's
/// transport.
#[async_trait]
pub trait ControllerClient: Send + Sync {
    async fn get_physical_topology(&self) -> Result<TopologyDescription, ControllerError>;

    async fn create_network(
        &self,
        protocol: &str,
        host: &str,
        port: u16,
        subnet: &str,
    ) -> Result<TenantId, ControllerError>;

    async fn create_switch(
        &self,
        tenant_id: TenantId,
        dpids: &[Dpid],
    ) -> Result<SwitchId, ControllerError>;

    async fn create_link(&self, tenant_id: TenantId, path: &str) -> Result<(), ControllerError>;

    async fn create_host(
        &self,
        tenant_id: TenantId,
        dpid: Dpid,
        port: PortNo,
        mac: &str,
    ) -> Result<(), ControllerError>;

    async fn create_switch_route(
        &self,
        tenant_id: TenantId,
        switch_id: SwitchId,
        route: &Route,
    ) -> Result<(), ControllerError>;

    async fn start_network(&self, tenant_id: TenantId) -> Result<(), ControllerError>;
}
