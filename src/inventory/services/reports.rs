//! Serializable result payloads produced by [`super::DiagnosticsService`].

use crate::inventory::domain::{
    AgentId, ClassifiedAgent, ClassifiedConnector, ConnectivityState, ConnectorId, Group, GroupId,
    HealthState, Issue, SchemaEntry, TableStatus, TableSummary, Verdict,
};
use serde::Serialize;
use serde_json::Value;

/// Root of the connector dashboard links.
pub const DASHBOARD_BASE_URL: &str = "https://fivetran.com/dashboard/connectors";

/// Dashboard link for a connector's status page.
#[must_use]
pub fn dashboard_url(id: &ConnectorId) -> String {
    format!("{DASHBOARD_BASE_URL}/{id}/status")
}

/// Filters applied to a listing, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFilters {
    /// Environment token, when the environment filter is active.
    pub env: Option<String>,
    /// Status token, `all` when status filtering is disabled.
    pub status: &'static str,
    /// Names of the groups selected by the environment filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_groups: Option<Vec<String>>,
}

/// Result of `list_groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupsReport {
    /// Every group.
    pub groups: Vec<Group>,
    /// Number of groups.
    pub count: usize,
}

/// One row of `list_connectors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorSummary {
    /// Connector identifier.
    pub id: ConnectorId,
    /// Connector type.
    pub service: Option<String>,
    /// Destination schema name.
    pub schema: Option<String>,
    /// Owning group.
    pub group_id: Option<GroupId>,
    /// Owning group's display name, when resolvable.
    pub group_name: Option<String>,
    /// Normalized health.
    pub health_state: HealthState,
    /// Raw sync state.
    pub sync_state: Option<String>,
    /// Raw setup state.
    pub setup_state: Option<String>,
    /// Whether the connector is paused.
    pub paused: bool,
    /// Number of active warnings.
    pub warning_count: usize,
    /// Dashboard link.
    pub dashboard_url: String,
}

impl ConnectorSummary {
    pub(crate) fn new(classified: ClassifiedConnector, groups: &[Group]) -> Self {
        let ClassifiedConnector { record, state } = classified;
        let group_name = record.group_id.as_ref().and_then(|group_id| {
            groups
                .iter()
                .find(|group| &group.id == group_id)
                .map(|group| group.name.clone())
        });
        Self {
            dashboard_url: dashboard_url(&record.id),
            paused: record.is_paused(),
            warning_count: record.warnings().len(),
            sync_state: record.sync_state().map(str::to_owned),
            setup_state: record.setup_state().map(str::to_owned),
            health_state: state,
            group_name,
            id: record.id,
            service: record.service,
            schema: record.schema,
            group_id: record.group_id,
        }
    }
}

/// Result of `list_connectors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorsReport {
    /// Connectors that passed the filters, in platform order.
    pub connectors: Vec<ConnectorSummary>,
    /// Number of returned connectors.
    pub count: usize,
    /// Applied filters.
    pub filters: AppliedFilters,
}

/// One schema of `get_connector_schema_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaView {
    /// Schema name.
    pub name: String,
    /// Whether the schema is synced.
    pub enabled: bool,
    /// Number of tables in the schema.
    pub table_count: usize,
    /// Number of synced tables in the schema.
    pub enabled_table_count: usize,
    /// Tables of the schema.
    pub tables: Vec<TableStatus>,
}

impl From<&SchemaEntry> for SchemaView {
    fn from(entry: &SchemaEntry) -> Self {
        Self {
            name: entry.name.clone(),
            enabled: entry.enabled,
            table_count: entry.tables.len(),
            enabled_table_count: entry.enabled_table_count(),
            tables: entry.tables.clone(),
        }
    }
}

/// Result of `get_connector_schema_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaStatusReport {
    /// Connector identifier.
    pub connector_id: ConnectorId,
    /// Dashboard link.
    pub dashboard_url: String,
    /// Schemas with their tables.
    pub schemas: Vec<SchemaView>,
    /// Number of schemas.
    pub schema_count: usize,
    /// Table counts across all schemas.
    pub summary: TableSummary,
}

/// Key facts about a diagnosed connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisSummary {
    /// Connector type.
    pub service: Option<String>,
    /// Destination schema name.
    pub schema: Option<String>,
    /// Owning group.
    pub group_id: Option<GroupId>,
    /// Raw setup state.
    pub setup_state: Option<String>,
    /// Raw sync state.
    pub sync_state: Option<String>,
    /// Whether the connector is paused.
    pub paused: bool,
    /// Last successful sync timestamp.
    pub succeeded_at: Option<String>,
    /// Last failed sync timestamp.
    pub failed_at: Option<String>,
    /// Whole hours since the last successful sync.
    pub hours_since_success: Option<i64>,
    /// Whole hours since the last failed sync.
    pub hours_since_failure: Option<i64>,
}

/// Boolean checks evaluated during diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosisChecks {
    /// The connector is paused.
    pub is_paused: bool,
    /// A sync is in progress.
    pub is_syncing: bool,
    /// Setup is connected.
    pub setup_complete: bool,
    /// The connector reports warnings.
    pub has_warnings: bool,
    /// A failure happened inside the recent-failure window.
    pub has_recent_failure: bool,
    /// Number of tables known to the connector.
    pub tables_total: usize,
    /// Number of synced tables.
    pub tables_enabled: usize,
    /// Number of tables excluded from sync.
    pub tables_disabled: usize,
}

/// Result of `diagnose_connector`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    /// Connector identifier.
    pub connector_id: ConnectorId,
    /// Dashboard link.
    pub dashboard_url: String,
    /// Normalized health.
    pub health_state: HealthState,
    /// Overall verdict.
    pub verdict: Verdict,
    /// Issues, most severe first.
    pub issues: Vec<Issue>,
    /// Number of issues.
    pub issue_count: usize,
    /// Deduplicated recommendations in issue order.
    pub recommendations: Vec<String>,
    /// Key facts.
    pub summary: DiagnosisSummary,
    /// Boolean checks.
    pub checks: DiagnosisChecks,
}

/// Result of `get_sync_history`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncHistoryReport {
    /// Connector identifier.
    pub connector_id: ConnectorId,
    /// Last successful sync timestamp.
    pub last_succeeded_at: Option<String>,
    /// Last failed sync timestamp.
    pub last_failed_at: Option<String>,
    /// Whole hours since the last successful sync.
    pub hours_since_success: Option<i64>,
    /// Whole hours since the last failed sync.
    pub hours_since_failure: Option<i64>,
    /// Raw sync state.
    pub sync_state: Option<String>,
    /// Sync frequency in minutes.
    pub sync_frequency: Option<u64>,
    /// Schedule type.
    pub schedule_type: Option<String>,
    /// Active warnings.
    pub warnings: Vec<Value>,
    /// Connector configuration, present only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// One row of `list_hybrid_agents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    /// Agent identifier.
    pub id: AgentId,
    /// Human-readable agent name.
    pub display_name: Option<String>,
    /// Owning group.
    pub group_id: Option<GroupId>,
    /// Normalized connectivity.
    pub connectivity_state: ConnectivityState,
    /// Registration timestamp.
    pub registered_at: Option<String>,
    /// Number of connectors assigned to the agent.
    pub connector_count: usize,
}

impl From<ClassifiedAgent> for AgentSummary {
    fn from(classified: ClassifiedAgent) -> Self {
        let ClassifiedAgent { record, state } = classified;
        Self {
            connector_count: record.usage.len(),
            id: record.id,
            display_name: record.display_name,
            group_id: record.group_id,
            connectivity_state: state,
            registered_at: record.registered_at,
        }
    }
}

/// Result of `list_hybrid_agents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentsReport {
    /// Agents that passed the filters, in platform order.
    pub agents: Vec<AgentSummary>,
    /// Number of returned agents.
    pub count: usize,
    /// Applied filters.
    pub filters: AppliedFilters,
}

/// Result of `get_hybrid_agent_details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentDetailReport {
    /// Agent identifier.
    pub agent_id: AgentId,
    /// Human-readable agent name.
    pub display_name: Option<String>,
    /// Owning group.
    pub group_id: Option<GroupId>,
    /// Normalized connectivity.
    pub connectivity_state: ConnectivityState,
    /// Registration timestamp.
    pub registered_at: Option<String>,
    /// Number of connectors assigned to the agent.
    pub connector_count: usize,
    /// Connector assignments as reported by the platform.
    pub usage: Vec<Value>,
}

impl From<ClassifiedAgent> for AgentDetailReport {
    fn from(classified: ClassifiedAgent) -> Self {
        let ClassifiedAgent { record, state } = classified;
        Self {
            connector_count: record.usage.len(),
            agent_id: record.id,
            display_name: record.display_name,
            group_id: record.group_id,
            connectivity_state: state,
            registered_at: record.registered_at,
            usage: record.usage,
        }
    }
}
