//! MCP server registering the diagnostics tools.

use super::{
    handlers,
    params::{AgentIdParams, ConnectorIdParams, ListParams, SyncHistoryParams},
};
use crate::inventory::{
    domain::DiagnosisPolicy, ports::PlatformFetcher, services::DiagnosticsService,
};
use mockable::DefaultClock;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ErrorData as McpError, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;
use std::sync::Arc;

const INSTRUCTIONS: &str = "Read-only diagnostics for Fivetran connectors and hybrid \
deployment agents. Start with list_connectors (filter by env and status), then use \
diagnose_connector, get_sync_history, or get_connector_schema_status on a single \
connector. Every tool returns a JSON object whose status field is success or error.";

/// Shared diagnostics service behind the tools.
pub type ToolService = DiagnosticsService<dyn PlatformFetcher, DefaultClock>;

/// MCP server exposing the seven diagnostics tools.
#[derive(Clone)]
pub struct DoctorServer {
    service: Arc<ToolService>,
    tool_router: ToolRouter<Self>,
}

impl DoctorServer {
    /// Creates a server over a platform fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PlatformFetcher>, policy: DiagnosisPolicy) -> Self {
        Self {
            service: Arc::new(DiagnosticsService::new(
                fetcher,
                Arc::new(DefaultClock),
                policy,
            )),
            tool_router: Self::tool_router(),
        }
    }

    /// Returns the diagnostics service backing the tools.
    #[must_use]
    pub fn service(&self) -> &ToolService {
        &self.service
    }
}

fn text_result(value: &Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| McpError::internal_error(err.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl DoctorServer {
    #[tool(description = "List all Fivetran groups (destinations) with their ids and names.")]
    async fn list_groups(&self) -> Result<CallToolResult, McpError> {
        let envelope = handlers::list_groups(self.service()).await;
        text_result(&envelope)
    }

    #[tool(
        description = "List connectors with normalized health. Optional env matches group names \
        (case-insensitive substring) or group ids; optional status is one of all, healthy, \
        failed, warning, paused, unknown."
    )]
    async fn list_connectors(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = handlers::list_connectors(self.service(), params).await;
        text_result(&envelope)
    }

    #[tool(description = "Show schema, table, and column sync status for a connector.")]
    async fn get_connector_schema_status(
        &self,
        Parameters(params): Parameters<ConnectorIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = handlers::get_connector_schema_status(self.service(), params).await;
        text_result(&envelope)
    }

    #[tool(
        description = "Diagnose a connector: verdict, issues ranked by severity, and \
        recommended next actions."
    )]
    async fn diagnose_connector(
        &self,
        Parameters(params): Parameters<ConnectorIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = handlers::diagnose_connector(self.service(), params).await;
        text_result(&envelope)
    }

    #[tool(
        description = "Show last success and failure times, sync frequency, schedule, and \
        warnings for a connector. Set include_config to add its configuration."
    )]
    async fn get_sync_history(
        &self,
        Parameters(params): Parameters<SyncHistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = handlers::get_sync_history(self.service(), params).await;
        text_result(&envelope)
    }

    #[tool(
        description = "List hybrid deployment agents with normalized connectivity. Optional env \
        filters by group; optional status is one of all, live, offline, unknown."
    )]
    async fn list_hybrid_agents(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = handlers::list_hybrid_agents(self.service(), params).await;
        text_result(&envelope)
    }

    #[tool(description = "Show a hybrid deployment agent's connectivity and connector usage.")]
    async fn get_hybrid_agent_details(
        &self,
        Parameters(params): Parameters<AgentIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = handlers::get_hybrid_agent_details(self.service(), params).await;
        text_result(&envelope)
    }
}

#[tool_handler]
impl ServerHandler for DoctorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
