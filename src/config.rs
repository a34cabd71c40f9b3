//! Runtime Configuration
//!
//! Command line and environment settings for the planner process.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "ovx-planner", version, about = "OpenVirteX network planner (JSON-RPC 2.0)")]
pub struct PlannerConfig {
    /// Address to listen on.
    pub address: IpAddr,

    /// Port to listen on.
    pub port: u16,

    /// Base URL of the OpenVirteX controller API.
    #[arg(long, env = "OVX_CONTROLLER_URL", default_value = "http://127.0.0.1:8080")]
    pub controller_url: String,

    /// Timeout for a single controller call, in milliseconds.
    #[arg(long, env = "OVX_CONTROLLER_TIMEOUT_MS", default_value_t = 5_000)]
    pub controller_timeout_ms: u64,
}

impl PlannerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    pub fn controller_timeout(&self) -> Duration {
        Duration::from_millis(self.controller_timeout_ms)
    }
}
