//! Application services for connector and agent diagnostics.

mod diagnostics;
pub mod reports;

pub use diagnostics::{DiagnosticsResult, DiagnosticsService, DiagnosticsServiceError};
pub use reports::{
    AgentDetailReport, AgentSummary, AgentsReport, AppliedFilters, ConnectorSummary,
    ConnectorsReport, DiagnosisChecks, DiagnosisReport, DiagnosisSummary, GroupsReport,
    SchemaStatusReport, SchemaView, SyncHistoryReport, dashboard_url,
};
