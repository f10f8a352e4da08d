//! Server configuration

use clap::Parser;
use std::net::SocketAddr;

/// Ironframe API server
#[derive(Parser, Debug, Clone)]
#[command(name = "ironframe-api")]
#[command(version)]
#[command(about = "Ironframe GRC Dashboard API", long_about = None)]
pub struct ServerConfig {
    /// Listen address
    #[arg(long, env = "IRONFRAME_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Service name reported by the health check
    #[arg(long, env = "IRONFRAME_SERVICE_NAME", default_value = "agent-manager")]
    pub service_name: String,

    /// Records retained per store before the oldest are dropped
    #[arg(long, env = "IRONFRAME_AUDIT_RETENTION", default_value_t = ironframe_core::store::DEFAULT_RETENTION)]
    pub audit_retention: usize,

    /// Records returned by list endpoints
    #[arg(long, env = "IRONFRAME_VIEW_LIMIT", default_value_t = ironframe_core::store::DEFAULT_VIEW_LIMIT)]
    pub view_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            service_name: "agent-manager".into(),
            audit_retention: ironframe_core::store::DEFAULT_RETENTION,
            view_limit: ironframe_core::store::DEFAULT_VIEW_LIMIT,
        }
    }
}
