use super::error::ProvisioningError;
use super::orchestrator::ProvisioningOrchestrator;
use super::protocol::*;
use super::types::NetworkMode;
use crate::rpc::protocol::RpcError;
use crate::rpc::registry::MethodTable;
use crate::topology::error::RouteError;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Adds the planner's methods to `methods`.
pub fn register_methods(methods: &mut MethodTable, orchestrator: Arc<ProvisioningOrchestrator>) {
    let planner = orchestrator.clone();
    methods.register(METHOD_CREATE_NETWORK, move |_id, params| {
        let planner = planner.clone();
        async move { handle_create_network(planner, params).await }
    });

    let planner = orchestrator.clone();
    methods.register(METHOD_GET_ROUTE, move |_id, params| {
        let planner = planner.clone();
        async move { handle_get_route(planner, params).await }
    });

    let planner = orchestrator;
    methods.register(METHOD_REFRESH_TOPOLOGY, move |_id, _params| {
        let planner = planner.clone();
        async move { handle_refresh_topology(planner).await }
    });
}

pub async fn handle_create_network(
    planner: Arc<ProvisioningOrchestrator>,
    params: Value,
) -> Result<Value, RpcError> {
    check_network_type(&params)?;
    let params: CreateNetworkParams = parse_params(params)?;
    let summary = planner.create_network(params).await?;
    to_result(&summary)
}

pub async fn handle_get_route(
    planner: Arc<ProvisioningOrchestrator>,
    params: Value,
) -> Result<Value, RpcError> {
    let params: GetRouteParams = parse_params(params)?;
    let response = planner.plan_route(&params).await.map_err(|error| match error {
        ProvisioningError::Route {
            source: source @ RouteError::NoRouteFound { .. },
            ..
        } => RpcError::invalid_params(source.to_string()),
        other => other.into(),
    })?;
    to_result(&response)
}

pub async fn handle_refresh_topology(planner: Arc<ProvisioningOrchestrator>) -> Result<Value, RpcError> {
    let snapshot = planner.refresh_topology().await?;
    to_result(&RefreshTopologyResponse {
        snapshot: snapshot.generation(),
        switches: snapshot.topology().switch_count(),
        links: snapshot.topology().link_count(),
    })
}

/// Looks at `network.type` on the raw params, so an unknown type is reported
/// as such even when the other network fields are missing or malformed.
fn check_network_type(params: &Value) -> Result<(), ProvisioningError> {
    let Some(network_type) = params.pointer("/network/type").and_then(Value::as_str) else {
        return Ok(());
    };

    match network_type.parse::<NetworkMode>() {
        Ok(NetworkMode::Custom) => Err(ProvisioningError::UnsupportedOperation(NetworkMode::Custom)),
        Ok(_) => Ok(()),
        Err(network_type) => Err(ProvisioningError::InvalidNetworkType(network_type)),
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal(e.to_string()))
}
