//! Tool argument schemas.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Arguments of `list_connectors` and `list_hybrid_agents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct ListParams {
    /// Environment token matched case-insensitively against group names,
    /// or exactly against a group id (for example `prod`).
    #[serde(default)]
    pub env: Option<String>,
    /// Status filter; `all` or omitted disables status filtering.
    #[serde(default)]
    pub status: Option<String>,
}

/// Arguments of tools addressing a single connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct ConnectorIdParams {
    /// Connector identifier (required).
    #[serde(default)]
    pub connector_id: Option<String>,
}

/// Arguments of `get_sync_history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SyncHistoryParams {
    /// Connector identifier (required).
    #[serde(default)]
    pub connector_id: Option<String>,
    /// Include the connector configuration object in the result.
    #[serde(default)]
    pub include_config: bool,
}

/// Arguments of `get_hybrid_agent_details`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct AgentIdParams {
    /// Hybrid deployment agent identifier (required).
    #[serde(default)]
    pub agent_id: Option<String>,
}
