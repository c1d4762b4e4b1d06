//! Domain model for connector and hybrid agent diagnostics.
//!
//! Raw platform records are extracted totally from JSON, normalized into a
//! small closed set of semantic states, filtered by environment and status,
//! and diagnosed into ranked issues. Everything here is pure: no I/O and no
//! clock access beyond the instant passed in by the caller.

mod diagnosis;
mod error;
mod filter;
mod health;
mod ids;
mod raw;
mod schema;

pub use diagnosis::{
    Diagnosis, DiagnosisPolicy, Issue, IssueCategory, Severity, Verdict, diagnose, hours_between,
};
pub use error::{InventoryDomainError, ParseConnectivityStateError, ParseHealthStateError};
pub use filter::{
    ALL_STATUSES, Classified, ClassifiedAgent, ClassifiedConnector, EnvFilter, FilterCriteria,
    FilterState, GroupOwned, StatusFilter,
};
pub use health::{
    ConnectivityState, HealthState, has_setup_failure, has_sync_failure, normalize_agent,
    normalize_connector,
};
pub use ids::{AgentId, ConnectorId, GroupId};
pub use raw::{Group, RawConnector, RawConnectorStatus, RawHybridAgent, parse_timestamp};
pub use schema::{ColumnStatus, SchemaEntry, SchemaStatus, TableStatus, TableSummary};
