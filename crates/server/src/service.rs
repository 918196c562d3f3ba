//! rmcp service wrapper around the Frigate tool source.
//!
//! Transport framing (stdio or streamable HTTP) stays outside; this type
//! only adapts `FrigateToolSource` to the `ServerHandler` contract and maps
//! runtime errors onto MCP error codes.

use frigate_tools::config::FrigateConfig;
use frigate_tools::error::FrigateToolsError;
use frigate_tools::runtime::FrigateToolSource;
use rmcp::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use serde_json::Value;

#[derive(Clone)]
pub struct FrigateService {
    source: FrigateToolSource,
}

impl FrigateService {
    #[must_use]
    pub fn new(config: FrigateConfig) -> Self {
        Self {
            source: FrigateToolSource::new(config),
        }
    }
}

impl ServerHandler for FrigateService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "frigate-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            instructions: Some(
                "Read-only tools over a Frigate NVR: list cameras and detection events, fetch \
                 event details and media URLs, system statistics, per-day recording summaries, \
                 and a reduced view of the configuration."
                    .to_string(),
            ),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.source.list_tools(),
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        self.source
            .call_tool(&request.name, arguments)
            .await
            .map_err(into_error_data)
    }
}

fn into_error_data(e: FrigateToolsError) -> ErrorData {
    match e {
        FrigateToolsError::Runtime(_) | FrigateToolsError::NotFound(_) => {
            ErrorData::invalid_params(e.to_string(), None)
        }
        FrigateToolsError::Config(_)
        | FrigateToolsError::Http(_)
        | FrigateToolsError::Transport(_) => ErrorData::internal_error(e.to_string(), None),
    }
}
