//! Ironframe API server

use clap::Parser;
use ironframe_api::{build_router, ApiState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    let app = build_router(ApiState::new(&config));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        service = %config.service_name,
        view_limit = config.view_limit,
        retention = config.audit_retention,
        "Ironframe API listening on {}",
        config.bind
    );

    axum::serve(listener, app).await?;
    Ok(())
}
