//! Streamable HTTP transport for the MCP surface.
//!
//! Serves rmcp's streamable HTTP session endpoint at `/mcp` plus a small
//! `/health` probe, bound to the configured host/port.

use crate::service::FrigateService;
use anyhow::Context as _;
use axum::routing::get;
use frigate_tools::config::FrigateConfig;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use serde_json::json;

/// Run the server until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or the server
/// loop fails.
pub async fn serve(config: FrigateConfig) -> anyhow::Result<()> {
    let bind = format!("{}:{}", config.server_host(), config.server_port());

    let mcp_service = StreamableHttpService::new(
        move || Ok(FrigateService::new(config.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let app = axum::Router::new()
        .nest_service("/mcp", mcp_service)
        .route("/health", get(health));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    tracing::info!(addr = %bind, "MCP streamable HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve streamable HTTP")?;

    Ok(())
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
