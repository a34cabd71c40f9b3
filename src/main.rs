use axum::{Extension, Router, routing::post};
use clap::Parser;
use ovx_planner::config::PlannerConfig;
use ovx_planner::controller::client::ControllerClient;
use ovx_planner::controller::http::HttpControllerClient;
use ovx_planner::provisioning::handlers::register_methods;
use ovx_planner::provisioning::orchestrator::ProvisioningOrchestrator;
use ovx_planner::rpc::dispatcher::Dispatcher;
use ovx_planner::rpc::handlers::{ENDPOINT_RPC, handle_rpc};
use ovx_planner::rpc::registry::MethodTable;
use ovx_planner::topology::snapshot::TopologyCache;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PlannerConfig::parse();
    let listen_addr = config.listen_addr();

    tracing::info!("Starting planner on {}", listen_addr);
    tracing::info!(
        "Controller API at {} (timeout {:?})",
        config.controller_url,
        config.controller_timeout()
    );

    // 1. Controller client and topology cache:
    let controller: Arc<dyn ControllerClient> = Arc::new(HttpControllerClient::new(
        &config.controller_url,
        config.controller_timeout(),
    )?);
    let cache = TopologyCache::new();

    // 2. Method table:
    let orchestrator = ProvisioningOrchestrator::new(controller, cache);
    let mut methods = MethodTable::new();
    register_methods(&mut methods, orchestrator);
    let dispatcher = Dispatcher::new(methods);

    // 3. HTTP Router:
    let app = Router::new()
        .route(ENDPOINT_RPC, post(handle_rpc))
        .layer(Extension(dispatcher));

    // 4. Start HTTP server:
    tracing::info!("JSON-RPC handler listening on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
