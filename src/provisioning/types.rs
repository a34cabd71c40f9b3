use super::protocol::HostSpec;
use crate::controller::client::{SwitchId, TenantId};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Shape of the virtual network presented to the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// The whole physical network appears as a single virtual switch.
    BigSwitch,
    /// One virtual switch and link per physical switch and link.
    Physical,
    /// Tenant-defined mapping; not supported by the planner.
    Custom,
}

impl NetworkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMode::BigSwitch => "bigswitch",
            NetworkMode::Physical => "physical",
            NetworkMode::Custom => "custom",
        }
    }
}

impl FromStr for NetworkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bigswitch" => Ok(NetworkMode::BigSwitch),
            "physical" => Ok(NetworkMode::Physical),
            "custom" => Ok(NetworkMode::Custom),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow stage, reported back to the caller when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProvisioningStep {
    FetchTopology,
    CreateNetwork,
    CreateSwitch,
    CreateLink,
    ComputeRoute,
    CreateSwitchRoute,
    CreateHost,
    StartNetwork,
}

impl ProvisioningStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisioningStep::FetchTopology => "fetchTopology",
            ProvisioningStep::CreateNetwork => "createNetwork",
            ProvisioningStep::CreateSwitch => "createSwitch",
            ProvisioningStep::CreateLink => "createLink",
            ProvisioningStep::ComputeRoute => "computeRoute",
            ProvisioningStep::CreateSwitchRoute => "createSwitchRoute",
            ProvisioningStep::CreateHost => "createHost",
            ProvisioningStep::StartNetwork => "startNetwork",
        }
    }
}

impl fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one `createNetwork` workflow. Owned by the request that created
/// it and dropped when the request completes or fails.
#[derive(Debug)]
pub struct ProvisioningContext {
    pub mode: NetworkMode,
    pub tenant_id: Option<TenantId>,
    pub switch_ids: Vec<SwitchId>,
    pub pending_hosts: Vec<HostSpec>,
    pub routes: usize,
    pub links: usize,
}

impl ProvisioningContext {
    pub fn new(mode: NetworkMode, hosts: Vec<HostSpec>) -> Self {
        Self {
            mode,
            tenant_id: None,
            switch_ids: Vec::new(),
            pending_hosts: hosts,
            routes: 0,
            links: 0,
        }
    }
}
