use super::types::{NetworkMode, ProvisioningStep};
use crate::controller::client::{ControllerError, TenantId};
use crate::rpc::protocol::{INVALID_NETWORK_TYPE, RpcError};
use crate::topology::error::{RouteError, TopologyError};

use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("Unsupported network type '{0}'")]
    InvalidNetworkType(String),
    #[error("unsupported operation: network mode '{0}' is not implemented")]
    UnsupportedOperation(NetworkMode),
    #[error("physical topology rejected: {0}")]
    Topology(#[source] TopologyError),
    #[error("route computation failed: {source}")]
    Route {
        tenant_id: Option<TenantId>,
        #[source]
        source: RouteError,
    },
    #[error("{step} failed: {source}")]
    Controller {
        step: ProvisioningStep,
        tenant_id: Option<TenantId>,
        #[source]
        source: ControllerError,
    },
}

impl ProvisioningError {
    pub fn controller(
        step: ProvisioningStep,
        tenant_id: Option<TenantId>,
    ) -> impl FnOnce(ControllerError) -> Self {
        move |source| Self::Controller {
            step,
            tenant_id,
            source,
        }
    }

    /// Workflow stage the error belongs to, if it happened past validation.
    pub fn step(&self) -> Option<ProvisioningStep> {
        match self {
            Self::Topology(_) => Some(ProvisioningStep::FetchTopology),
            Self::Route { .. } => Some(ProvisioningStep::ComputeRoute),
            Self::Controller { step, .. } => Some(*step),
            _ => None,
        }
    }

    fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Self::Route { tenant_id, .. } | Self::Controller { tenant_id, .. } => *tenant_id,
            _ => None,
        }
    }
}

impl From<ProvisioningError> for RpcError {
    fn from(error: ProvisioningError) -> Self {
        let message = error.to_string();
        match &error {
            ProvisioningError::InvalidParams(_) => RpcError::invalid_params(message),
            ProvisioningError::InvalidNetworkType(network_type) => {
                RpcError::new(INVALID_NETWORK_TYPE, "Unsupported network type")
                    .with_data(json!({ "type": network_type }))
            }
            ProvisioningError::UnsupportedOperation(mode) => {
                RpcError::invalid_params(message).with_data(json!({ "mode": mode }))
            }
            ProvisioningError::Topology(_)
            | ProvisioningError::Route { .. }
            | ProvisioningError::Controller { .. } => {
                let mut data = Map::new();
                if let Some(step) = error.step() {
                    data.insert("step".to_string(), json!(step));
                }
                if let Some(tenant_id) = error.tenant_id() {
                    data.insert("tenantId".to_string(), json!(tenant_id));
                }
                data.insert("detail".to_string(), json!(message));
                RpcError::internal("Provisioning failed").with_data(Value::Object(data))
            }
        }
    }
}
