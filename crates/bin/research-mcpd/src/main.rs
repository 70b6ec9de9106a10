//! Daemon entry point for the research MCP server.
//!
//! Loads configuration from the command line and environment, installs
//! logging on stderr, builds the operation registry, and serves MCP over the
//! enabled transports.

mod config;
mod registry;

use std::error::Error;
use std::future::Future;
use std::process::ExitCode;

use research_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, ResearchConfig};
use crate::registry::build_registry;

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ResearchConfig::from_args() {
        Ok(config) => config,
        Err(err) => {
            init_logging(ResearchConfig::default_log_filter());
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_filter);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "research-mcpd stopped");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout belongs to the stdio transport.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(config: ResearchConfig) -> Result<(), BoxError> {
    let registry = build_registry()?;
    let http_config = McpHttpServerConfig::new(config.mcp_http_addr)
        .with_stateful_mode(config.stateful_mode)
        .with_sse_keep_alive(config.sse_keep_alive);

    match (config.enable_stdio, config.mcp_serve) {
        (true, true) => {
            serve_alongside(
                serve_stdio(registry.clone()),
                serve_streamable_http(registry, http_config),
            )
            .await
        }
        (true, false) => serve_stdio(registry).await,
        (false, true) => serve_streamable_http(registry, http_config).await,
        (false, false) => Err(ConfigError::NoTransport.into()),
    }
}

/// Drives both transports. The HTTP result decides the exit; stdio closing or
/// failing (no stdin under a supervisor) is only logged.
async fn serve_alongside<S, H>(stdio: S, http: H) -> Result<(), BoxError>
where
    S: Future<Output = Result<(), BoxError>>,
    H: Future<Output = Result<(), BoxError>>,
{
    let stdio = async {
        match stdio.await {
            Ok(()) => info!("stdio session ended, HTTP transport still serving"),
            Err(err) => warn!(error = %err, "stdio transport stopped, HTTP transport still serving"),
        }
    };
    let ((), http) = tokio::join!(stdio, http);
    http
}
