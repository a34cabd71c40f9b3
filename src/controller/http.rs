//! OpenVirteX HTTP Client
//!
//! Implements [`ControllerClient`] by issuing JSON-RPC 2.0 calls over HTTP.
//! Tenant management lives under `/tenant`, topology queries under `/status`.

use super::client::*;
use crate::rpc::protocol::{Request, Response};
use crate::topology::route::Route;
use crate::topology::types::{Dpid, PortNo, TopologyDescription};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const ENDPOINT_TENANT: &str = "/tenant";
pub const ENDPOINT_STATUS: &str = "/status";

pub struct HttpControllerClient {
    base_url: String,
    http_client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpControllerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ControllerError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, endpoint: &str, method: &str, params: Value) -> Result<Value, ControllerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request::new(method, params, json!(id));
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("Controller call {} (id {}) -> {}", method, id, url);

        let response = self.http_client.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(ControllerError::Status {
                method: method.to_string(),
                status: response.status().as_u16(),
            });
        }

        let reply: Response = response.json().await.map_err(|e| ControllerError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })?;

        reply.into_result().map_err(|error| ControllerError::Rpc {
            method: method.to_string(),
            error,
        })
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: &str,
        params: Value,
    ) -> Result<T, ControllerError> {
        let result = self.call(endpoint, method, params).await?;
        serde_json::from_value(result).map_err(|e| ControllerError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Pulls a numeric id out of a result that is either the bare number or an
/// object carrying it under `field`.
fn extract_id(method: &str, result: &Value, field: &str) -> Result<u64, ControllerError> {
    result
        .as_u64()
        .or_else(|| result.get(field).and_then(Value::as_u64))
        .ok_or_else(|| ControllerError::Decode {
            method: method.to_string(),
            reason: format!("missing '{}' in {}", field, result),
        })
}

/// Splits `10.0.0.0/16` into the address and mask fields the tenant API takes.
fn split_subnet(subnet: &str) -> (String, Option<u8>) {
    match subnet.split_once('/') {
        Some((address, mask)) => (address.to_string(), mask.trim().parse().ok()),
        None => (subnet.to_string(), None),
    }
}

#[async_trait]
impl ControllerClient for HttpControllerClient {
    async fn get_physical_topology(&self) -> Result<TopologyDescription, ControllerError> {
        self.call_as(ENDPOINT_STATUS, "getPhysicalTopology", json!({}))
            .await
    }

    async fn create_network(
        &self,
        protocol: &str,
        host: &str,
        port: u16,
        subnet: &str,
    ) -> Result<TenantId, ControllerError> {
        let (network_address, mask) = split_subnet(subnet);
        let params = json!({
            "protocol": protocol,
            "controllerAddress": host,
            "controllerPort": port,
            "networkAddress": network_address,
            "mask": mask,
        });

        let result = self.call(ENDPOINT_TENANT, "createNetwork", params).await?;
        extract_id("createNetwork", &result, "tenantId").map(TenantId)
    }

    async fn create_switch(
        &self,
        tenant_id: TenantId,
        dpids: &[Dpid],
    ) -> Result<SwitchId, ControllerError> {
        let params = json!({ "tenantId": tenant_id, "dpids": dpids });

        let result = self.call(ENDPOINT_TENANT, "createSwitch", params).await?;
        extract_id("createSwitch", &result, "vdpid").map(SwitchId)
    }

    async fn create_link(&self, tenant_id: TenantId, path: &str) -> Result<(), ControllerError> {
        let params = json!({ "tenantId": tenant_id, "path": path });
        self.call(ENDPOINT_TENANT, "createLink", params).await?;
        Ok(())
    }

    async fn create_host(
        &self,
        tenant_id: TenantId,
        dpid: Dpid,
        port: PortNo,
        mac: &str,
    ) -> Result<(), ControllerError> {
        let params = json!({ "tenantId": tenant_id, "dpid": dpid, "port": port, "mac": mac });
        self.call(ENDPOINT_TENANT, "createHost", params).await?;
        Ok(())
    }

    async fn create_switch_route(
        &self,
        tenant_id: TenantId,
        switch_id: SwitchId,
        route: &Route,
    ) -> Result<(), ControllerError> {
        let params = json!({ "tenantId": tenant_id, "vdpid": switch_id, "route": route });
        self.call(ENDPOINT_TENANT, "createSwitchRoute", params).await?;
        Ok(())
    }

    async fn start_network(&self, tenant_id: TenantId) -> Result<(), ControllerError> {
        let params = json!({ "tenantId": tenant_id });
        self.call(ENDPOINT_TENANT, "startNetwork", params).await?;
        Ok(())
    }
}
