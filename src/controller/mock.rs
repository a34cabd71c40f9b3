//! In-memory controller used by the provisioning tests.

use super::client::*;
use crate::rpc::protocol::RpcError;
use crate::topology::route::Route;
use crate::topology::types::{Dpid, PortNo, TopologyDescription};

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetPhysicalTopology,
    CreateNetwork { protocol: String, host: String, port: u16, subnet: String },
    CreateSwitch { tenant_id: TenantId, dpids: Vec<Dpid> },
    CreateLink { tenant_id: TenantId, path: String },
    CreateHost { tenant_id: TenantId, dpid: Dpid, port: PortNo, mac: String },
    CreateSwitchRoute { tenant_id: TenantId, switch_id: SwitchId, route: Route },
    StartNetwork { tenant_id: TenantId },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::GetPhysicalTopology => "getPhysicalTopology",
            Call::CreateNetwork { .. } => "createNetwork",
            Call::CreateSwitch { .. } => "createSwitch",
            Call::CreateLink { .. } => "createLink",
            Call::CreateHost { .. } => "createHost",
            Call::CreateSwitchRoute { .. } => "createSwitchRoute",
            Call::StartNetwork { .. } => "startNetwork",
        }
    }
}

/// Records every call and answers from a fixed topology. Optionally fails
/// the first call to a given method.
pub struct RecordingController {
    topology: TopologyDescription,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<Call>>,
    next_switch: AtomicU64,
}

impl RecordingController {
    pub fn new(topology: TopologyDescription) -> Self {
        Self {
            topology,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
            next_switch: AtomicU64::new(100),
        }
    }

    pub fn failing_on(mut self, method: &'static str) -> Self {
        self.fail_on = Some(method);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|call| call.name() == method).count()
    }

    fn record(&self, call: Call) -> Result<(), ControllerError> {
        let name = call.name();
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(name) {
            return Err(ControllerError::Rpc {
                method: name.to_string(),
                error: RpcError::internal("injected failure"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ControllerClient for RecordingController {
    async fn get_physical_topology(&self) -> Result<TopologyDescription, ControllerError> {
        self.record(Call::GetPhysicalTopology)?;
        Ok(self.topology.clone())
    }

    async fn create_network(
        &self,
        protocol: &str,
        host: &str,
        port: u16,
        subnet: &str,
    ) -> Result<TenantId, ControllerError> {
        self.record(Call::CreateNetwork {
            protocol: protocol.to_string(),
            host: host.to_string(),
            port,
            subnet: subnet.to_string(),
        })?;
        Ok(TenantId(1))
    }

    async fn create_switch(
        &self,
        tenant_id: TenantId,
        dpids: &[Dpid],
    ) -> Result<SwitchId, ControllerError> {
        self.record(Call::CreateSwitch {
            tenant_id,
            dpids: dpids.to_vec(),
        })?;
        Ok(SwitchId(self.next_switch.fetch_add(1, Ordering::SeqCst)))
    }

    async fn create_link(&self, tenant_id: TenantId, path: &str) -> Result<(), ControllerError> {
        self.record(Call::CreateLink {
            tenant_id,
            path: path.to_string(),
        })
    }

    async fn create_host(
        &self,
        tenant_id: TenantId,
        dpid: Dpid,
        port: PortNo,
        mac: &str,
    ) -> Result<(), ControllerError> {
        self.record(Call::CreateHost {
            tenant_id,
            dpid,
            port,
            mac: mac.to_string(),
        })
    }

    async fn create_switch_route(
        &self,
        tenant_id: TenantId,
        switch_id: SwitchId,
        route: &Route,
    ) -> Result<(), ControllerError> {
        self.record(Call::CreateSwitchRoute {
            tenant_id,
            switch_id,
            route: route.clone(),
        })
    }

    async fn start_network(&self, tenant_id: TenantId) -> Result<(), ControllerError> {
        self.record(Call::StartNetwork { tenant_id })
    }
}
