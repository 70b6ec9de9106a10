//! MCP server implementation for research-mcp.
//!
//! This crate exposes the operation registry as MCP tools: `tools/list` is
//! answered from the catalog and `tools/call` goes through the dispatcher, so
//! every failure comes back as an in-band error result.

mod helpers;
pub mod server;

use std::future::Future;
use std::sync::Arc;

use research_core::{CallRequest, Dispatcher, OperationRegistry};
use rmcp::model::{
    CallToolRequestParams,
    CallToolResult,
    Implementation,
    JsonObject,
    ListToolsResult,
    PaginatedRequestParams,
    ServerCapabilities,
    ServerInfo,
    Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};

const SERVER_INSTRUCTIONS: &str = r"research-mcp provides executive job-search research tools.

Workflow:
1. Start with `research_company` for an overview of the target company.
2. Go deeper with `analyze_revenue_engine` and `linkedin_intelligence`.
3. Prepare with `interview_preparation` and `executive_brief` (both need `company` and `role`).
4. Plan the first quarter in the role with `create_30_60_90_plan`.

Notes:
- Every figure in a report is an illustrative placeholder, not retrieved data.
- Optional fields fall back to the defaults advertised in each tool's input schema.
- Failed calls return `isError: true` with `structuredContent.kind` set to
  `unknown_operation`, `invalid_params` or `handler_execution`.";

/// MCP server wrapper around the operation dispatcher.
#[derive(Clone)]
pub struct ResearchMcp {
    dispatcher: Dispatcher,
}

impl ResearchMcp {
    /// Creates a new server owning `registry`.
    #[must_use]
    pub fn new(registry: OperationRegistry) -> Self {
        Self::with_registry(Arc::new(registry))
    }

    /// Creates a new server using a shared registry handle.
    #[must_use]
    pub const fn with_registry(registry: Arc<OperationRegistry>) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// Tools advertised to clients, in catalog order.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher
            .registry()
            .list_operations()
            .iter()
            .map(helpers::tool_for)
            .collect()
    }

    /// Dispatches one tool call.
    pub async fn call(&self, name: impl Into<String>, arguments: Option<JsonObject>) -> CallToolResult {
        let request = CallRequest::new(name, helpers::arguments_value(arguments));
        helpers::tool_result(self.dispatcher.dispatch(request).await)
    }
}

impl ServerHandler for ResearchMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "research-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move { Ok(self.call(request.name.into_owned(), request.arguments).await) }
    }
}
