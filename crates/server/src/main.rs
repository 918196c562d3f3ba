//! Frigate MCP server entry point.
//!
//! Resolves connection settings from `FRIGATE_*` environment variables (and
//! an optional `.env` file), then serves the tool surface over the selected
//! transport. Logs go to stderr so stdout stays reserved for stdio framing.

mod http;
mod service;

use anyhow::Context as _;
use clap::Parser;
use frigate_tools::config::FrigateConfig;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use service::FrigateService;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Transport {
    /// JSON-RPC over stdin/stdout (for MCP clients like Claude Desktop)
    Stdio,
    /// Streamable HTTP bound to `FRIGATE_SERVER_HOST:FRIGATE_SERVER_PORT`
    Http,
}

#[derive(Debug, Parser)]
#[command(
    name = "frigate-mcp-server",
    version,
    about = "Expose a Frigate NVR's HTTP API as MCP tools"
)]
struct Cli {
    /// Transport to serve the tool surface on
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = FrigateConfig::from_env().context("resolve Frigate connection settings")?;
    tracing::info!(frigate = %config.base_url(), "resolved Frigate connection settings");

    match cli.transport {
        Transport::Stdio => run_stdio(config).await,
        Transport::Http => http::serve(config).await,
    }
}

async fn run_stdio(config: FrigateConfig) -> anyhow::Result<()> {
    let service = FrigateService::new(config)
        .serve(stdio())
        .await
        .context("serve MCP over stdio")?;
    service.waiting().await.context("stdio service terminated")?;
    Ok(())
}
