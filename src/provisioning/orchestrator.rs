//! Provisioning Workflows
//!
//! Drives the controller through the steps that materialize a tenant network:
//!
//! 1. **Topology**: fetch the physical topology and install a fresh snapshot.
//! 2. **Network**: create the tenant network.
//! 3. **Switches**: mode-specific. A big switch gets every host-to-host route
//!    registered on it; a physical clone gets one virtual link per physical link.
//! 4. **Hosts**: attach every requested host.
//! 5. **Start**: boot the tenant network.
//!
//! Steps run strictly in order and the first failure ends the workflow.
//! Resources created by earlier steps are left in place on the controller.

use super::error::ProvisioningError;
use super::protocol::*;
use super::types::*;
use crate::controller::client::{ControllerClient, TenantId};
use crate::topology::graph::Topology;
use crate::topology::snapshot::{RoutingSnapshot, TopologyCache};

use std::net::Ipv4Addr;
use std::sync::Arc;

pub struct ProvisioningOrchestrator {
    controller: Arc<dyn ControllerClient>,
    cache: Arc<TopologyCache>,
}

impl ProvisioningOrchestrator {
    pub fn new(controller: Arc<dyn ControllerClient>, cache: Arc<TopologyCache>) -> Arc<Self> {
        Arc::new(Self { controller, cache })
    }

    pub fn cache(&self) -> &Arc<TopologyCache> {
        &self.cache
    }

    /// Fetches the physical topology and publishes it as the current snapshot.
    pub async fn refresh_topology(&self) -> Result<Arc<RoutingSnapshot>, ProvisioningError> {
        let description = self
            .controller
            .get_physical_topology()
            .await
            .map_err(ProvisioningError::controller(ProvisioningStep::FetchTopology, None))?;

        let topology = Topology::build(&description).map_err(ProvisioningError::Topology)?;
        Ok(self.cache.install(topology))
    }

    /// Route on the current snapshot, loading one first if none is installed.
    pub async fn plan_route(&self, params: &GetRouteParams) -> Result<GetRouteResponse, ProvisioningError> {
        let snapshot = match self.cache.current() {
            Some(snapshot) => snapshot,
            None => self.refresh_topology().await?,
        };

        let route = snapshot
            .get_route(params.dpid_in, params.port_in, params.dpid_out, params.port_out)
            .map_err(|source| ProvisioningError::Route {
                tenant_id: None,
                source,
            })?;

        Ok(GetRouteResponse {
            snapshot: snapshot.generation(),
            route,
        })
    }

    pub async fn create_network(
        &self,
        params: CreateNetworkParams,
    ) -> Result<NetworkSummary, ProvisioningError> {
        let CreateNetworkParams { network, hosts } = params;

        let mode: NetworkMode = network.network_type.parse().map_err(|network_type| {
            tracing::error!("Unsupported network type: {}", network_type);
            ProvisioningError::InvalidNetworkType(network_type)
        })?;
        if mode == NetworkMode::Custom {
            tracing::error!("Custom networks are not supported");
            return Err(ProvisioningError::UnsupportedOperation(mode));
        }
        check_subnet(&network.subnet)?;

        let mut ctx = ProvisioningContext::new(mode, hosts);
        tracing::info!(
            "Provisioning {} network for {}:{} with {} hosts",
            mode,
            network.controller_address,
            network.controller_port,
            ctx.pending_hosts.len()
        );

        // 1. Physical topology; this workflow keeps using this snapshot even if
        //    another request installs a newer one meanwhile.
        let snapshot = self.refresh_topology().await?;
        check_hosts(snapshot.topology(), &ctx.pending_hosts)?;

        // 2. Tenant network
        let tenant_id = self
            .controller
            .create_network(
                &network.protocol,
                &network.controller_address,
                network.controller_port,
                &network.subnet,
            )
            .await
            .map_err(ProvisioningError::controller(ProvisioningStep::CreateNetwork, None))?;
        ctx.tenant_id = Some(tenant_id);
        tracing::info!("Created tenant network {}", tenant_id);

        // 3. Switches, and links or routes
        match mode {
            NetworkMode::BigSwitch => self.build_big_switch(&mut ctx, tenant_id, &snapshot).await?,
            NetworkMode::Physical => self.build_physical(&mut ctx, tenant_id, &snapshot).await?,
            NetworkMode::Custom => return Err(ProvisioningError::UnsupportedOperation(mode)),
        }

        // 4. Hosts
        let hosts = std::mem::take(&mut ctx.pending_hosts);
        for host in &hosts {
            self.controller
                .create_host(tenant_id, host.dpid, host.port_number, &host.mac)
                .await
                .map_err(ProvisioningError::controller(
                    ProvisioningStep::CreateHost,
                    ctx.tenant_id,
                ))?;
            tracing::debug!("Attached host {} at {}/{}", host.mac, host.dpid, host.port_number);
        }

        // 5. Boot
        self.controller
            .start_network(tenant_id)
            .await
            .map_err(ProvisioningError::controller(
                ProvisioningStep::StartNetwork,
                ctx.tenant_id,
            ))?;
        tracing::info!("Started tenant network {}", tenant_id);

        Ok(NetworkSummary {
            tenant_id,
            mode: mode.to_string(),
            switch_ids: ctx.switch_ids,
            hosts: hosts.len(),
            routes: ctx.routes,
            links: ctx.links,
        })
    }

    async fn build_big_switch(
        &self,
        ctx: &mut ProvisioningContext,
        tenant_id: TenantId,
        snapshot: &RoutingSnapshot,
    ) -> Result<(), ProvisioningError> {
        let dpids: Vec<_> = snapshot.topology().switches().collect();

        let switch_id = self
            .controller
            .create_switch(tenant_id, &dpids)
            .await
            .map_err(ProvisioningError::controller(
                ProvisioningStep::CreateSwitch,
                ctx.tenant_id,
            ))?;
        ctx.switch_ids.push(switch_id);
        tracing::info!("Created big switch {} over {} dpids", switch_id, dpids.len());

        let hosts = &ctx.pending_hosts;
        let mut routes = 0;
        for (index, src) in hosts.iter().enumerate() {
            for dst in &hosts[index + 1..] {
                for (from, to) in [(src, dst), (dst, src)] {
                    let route = snapshot
                        .get_route(from.dpid, from.port_number, to.dpid, to.port_number)
                        .map_err(|source| ProvisioningError::Route {
                            tenant_id: Some(tenant_id),
                            source,
                        })?;

                    self.controller
                        .create_switch_route(tenant_id, switch_id, &route)
                        .await
                        .map_err(ProvisioningError::controller(
                            ProvisioningStep::CreateSwitchRoute,
                            Some(tenant_id),
                        ))?;
                    routes += 1;
                }
            }
        }

        ctx.routes = routes;
        tracing::info!("Registered {} routes on big switch {}", routes, switch_id);
        Ok(())
    }

    async fn build_physical(
        &self,
        ctx: &mut ProvisioningContext,
        tenant_id: TenantId,
        snapshot: &RoutingSnapshot,
    ) -> Result<(), ProvisioningError> {
        let topology = snapshot.topology();

        for dpid in topology.switches() {
            let switch_id = self
                .controller
                .create_switch(tenant_id, &[dpid])
                .await
                .map_err(ProvisioningError::controller(
                    ProvisioningStep::CreateSwitch,
                    Some(tenant_id),
                ))?;
            ctx.switch_ids.push(switch_id);
        }
        tracing::info!("Created {} virtual switches", ctx.switch_ids.len());

        for link in topology.links() {
            self.controller
                .create_link(tenant_id, &link.path_string())
                .await
                .map_err(ProvisioningError::controller(
                    ProvisioningStep::CreateLink,
                    Some(tenant_id),
                ))?;
            ctx.links += 1;
        }
        tracing::info!("Created {} virtual links", ctx.links);

        Ok(())
    }
}

/// Every host must hang off a switch the controller reported.
fn check_hosts(topology: &Topology, hosts: &[HostSpec]) -> Result<(), ProvisioningError> {
    match hosts.iter().find(|host| !topology.contains(host.dpid)) {
        Some(host) => Err(ProvisioningError::InvalidParams(format!(
            "host {} is attached to unknown switch {}",
            host.mac, host.dpid
        ))),
        None => Ok(()),
    }
}

/// A tenant subnet is an IPv4 network address and a mask of at most 32 bits.
fn check_subnet(subnet: &str) -> Result<(), ProvisioningError> {
    let invalid = || ProvisioningError::InvalidParams(format!("invalid subnet '{}'", subnet));

    let (address, mask) = subnet.split_once('/').ok_or_else(invalid)?;
    address.trim().parse::<Ipv4Addr>().map_err(|_| invalid())?;
    match mask.trim().parse::<u8>() {
        Ok(mask) if mask <= 32 => Ok(()),
        _ => Err(invalid()),
    }
}
