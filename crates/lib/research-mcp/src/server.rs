//! Transport runners: one stdio session, or an HTTP listener that hands out
//! a `ResearchMcp` per session.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use research_core::OperationRegistry;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tracing::info;

use crate::ResearchMcp;

/// Listener settings for the `/mcp` endpoint.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    #[must_use]
    pub const fn with_sse_keep_alive(mut self, sse_keep_alive: Option<Duration>) -> Self {
        self.sse_keep_alive = sse_keep_alive;
        self
    }
}

/// Runs a single MCP session on stdin/stdout and returns when the peer hangs up.
///
/// # Errors
/// Fails if the session cannot be initialized or the io task dies.
pub async fn serve_stdio(
    registry: Arc<OperationRegistry>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = ResearchMcp::with_registry(registry);
    let (stdin, stdout) = stdio();
    info!("research-mcp serving on stdio");
    let running = serve_server(service, (stdin, stdout)).await?;
    let reason = running.waiting().await?;
    info!(?reason, "research-mcp stdio session ended");
    Ok(())
}

/// Binds `config.addr` and serves MCP sessions under `/mcp`; `/health`
/// answers `ok`.
///
/// # Errors
/// Fails if the address cannot be bound or the axum server exits with an error.
pub async fn serve_streamable_http(
    registry: Arc<OperationRegistry>,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service: StreamableHttpService<ResearchMcp, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(ResearchMcp::with_registry(registry.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "research-mcp listening on streamable HTTP");
    axum::serve(listener, app).await?;
    Ok(())
}
