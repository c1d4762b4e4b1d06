//! Connector diagnosis: ranked issues, recommendations, and an overall verdict.
//!
//! [`diagnose`] is a pure function of the connector detail, its schema tree,
//! the evaluation instant, and a [`DiagnosisPolicy`]. Issues are emitted in
//! a fixed order and then stably sorted by severity, so identical inputs
//! always produce identical diagnoses.

use super::{
    HealthState, RawConnector, SchemaStatus, has_setup_failure, has_sync_failure,
    normalize_connector,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Number of warnings copied into an issue's details.
const MAX_WARNING_DETAILS: usize = 3;

/// Issue severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The connector is not delivering data.
    Critical,
    /// Data delivery is at risk or delayed.
    Warning,
    /// Worth knowing, no action strictly required.
    Info,
}

impl Severity {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Category of a diagnosed issue. Each category has a fixed severity and
/// a fixed recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    /// Setup is broken or incomplete.
    SetupFailure,
    /// The last sync failed or syncing is blocked.
    SyncFailure,
    /// The platform rescheduled the sync after a transient problem.
    SyncRescheduled,
    /// The connector is paused.
    Paused,
    /// No successful sync within the staleness window.
    StaleSync,
    /// Warnings or schema configuration problems.
    SchemaWarning,
    /// A failure happened recently although the connector is syncing again.
    RecentFailure,
    /// Most tables of the connector are excluded from sync.
    SchemaPartiallyDisabled,
    /// The raw status could not be interpreted.
    UnrecognizedStatus,
}

impl IssueCategory {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetupFailure => "setup-failure",
            Self::SyncFailure => "sync-failure",
            Self::SyncRescheduled => "sync-rescheduled",
            Self::Paused => "paused",
            Self::StaleSync => "stale-sync",
            Self::SchemaWarning => "schema-warning",
            Self::RecentFailure => "recent-failure",
            Self::SchemaPartiallyDisabled => "schema-partially-disabled",
            Self::UnrecognizedStatus => "unrecognized-status",
        }
    }

    /// Severity attached to every issue of this category.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::SetupFailure | Self::SyncFailure => Severity::Critical,
            Self::SyncRescheduled | Self::Paused | Self::StaleSync | Self::SchemaWarning => {
                Severity::Warning
            }
            Self::RecentFailure | Self::SchemaPartiallyDisabled | Self::UnrecognizedStatus => {
                Severity::Info
            }
        }
    }

    /// Next action for an operator facing this category.
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::SetupFailure => {
                "Complete or repair the connector setup in the Fivetran dashboard"
            }
            Self::SyncFailure => {
                "Check source credentials and recent warnings, then review the connector logs for error details"
            }
            Self::SyncRescheduled => {
                "Monitor the next sync; the platform rescheduled it after a transient issue"
            }
            Self::Paused => "Resume the connector if downstream consumers expect fresh data",
            Self::StaleSync => "Verify the sync schedule and frequency settings",
            Self::SchemaWarning => {
                "Review and resolve the schema warnings in the Fivetran dashboard"
            }
            Self::RecentFailure => "Monitor the connector for recurring failures",
            Self::SchemaPartiallyDisabled => "Verify that the table selection is intentional",
            Self::UnrecognizedStatus => "Inspect the connector status in the Fivetran dashboard",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single diagnosed problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    severity: Severity,
    category: IssueCategory,
    description: String,
    source_fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Issue {
    /// Creates an issue; severity follows from the category.
    #[must_use]
    pub fn new(
        category: IssueCategory,
        description: impl Into<String>,
        source_fields: Vec<&'static str>,
    ) -> Self {
        Self {
            severity: category.severity(),
            category,
            description: description.into(),
            source_fields,
            details: None,
        }
    }

    /// Attaches raw supporting data.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns the issue severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the issue category.
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.category
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw fields the issue was derived from.
    #[must_use]
    pub fn source_fields(&self) -> &[&'static str] {
        &self.source_fields
    }

    /// Returns supporting raw data, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

/// Overall health verdict of a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No issues.
    Healthy,
    /// Only warning or informational issues.
    Degraded,
    /// At least one critical issue.
    Failed,
}

impl Verdict {
    /// Rolls issues up into a verdict.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues
            .iter()
            .any(|issue| issue.severity() == Severity::Critical)
        {
            Self::Failed
        } else if issues.is_empty() {
            Self::Healthy
        } else {
            Self::Degraded
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Time windows used to judge sync recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisPolicy {
    stale_sync_window: TimeDelta,
    recent_failure_window: TimeDelta,
}

impl DiagnosisPolicy {
    /// Default staleness window in hours.
    pub const DEFAULT_STALE_SYNC_HOURS: u32 = 48;

    /// Default recent-failure window in hours.
    pub const DEFAULT_RECENT_FAILURE_HOURS: u32 = 24;

    /// Creates a policy from window lengths in hours.
    #[must_use]
    pub fn from_hours(stale_sync_hours: u32, recent_failure_hours: u32) -> Self {
        Self {
            stale_sync_window: TimeDelta::hours(i64::from(stale_sync_hours)),
            recent_failure_window: TimeDelta::hours(i64::from(recent_failure_hours)),
        }
    }

    /// A connector without a successful sync inside this window is stale.
    #[must_use]
    pub const fn stale_sync_window(&self) -> TimeDelta {
        self.stale_sync_window
    }

    /// Failures inside this window are reported as recent.
    #[must_use]
    pub const fn recent_failure_window(&self) -> TimeDelta {
        self.recent_failure_window
    }
}

impl Default for DiagnosisPolicy {
    fn default() -> Self {
        Self::from_hours(
            Self::DEFAULT_STALE_SYNC_HOURS,
            Self::DEFAULT_RECENT_FAILURE_HOURS,
        )
    }
}

/// Synthesized verdict, ranked issues, and recommendations for one connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    health_state: HealthState,
    verdict: Verdict,
    issues: Vec<Issue>,
    recommendations: Vec<String>,
}

impl Diagnosis {
    /// Builds a diagnosis from unordered issues.
    ///
    /// Issues are stably sorted by severity; recommendations follow issue
    /// order with duplicates removed.
    #[must_use]
    pub fn from_issues(health_state: HealthState, mut issues: Vec<Issue>) -> Self {
        issues.sort_by_key(Issue::severity);
        let mut recommendations: Vec<String> = Vec::new();
        for issue in &issues {
            let text = issue.category().recommendation();
            if !recommendations.iter().any(|existing| existing == text) {
                recommendations.push(text.to_owned());
            }
        }
        Self {
            health_state,
            verdict: Verdict::from_issues(&issues),
            issues,
            recommendations,
        }
    }

    /// Returns the normalized connector health.
    #[must_use]
    pub const fn health_state(&self) -> HealthState {
        self.health_state
    }

    /// Returns the overall verdict.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns the issues, most severe first.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns the deduplicated recommendations.
    #[must_use]
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Whole hours elapsed between `earlier` and `now`.
#[must_use]
pub fn hours_between(earlier: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - earlier).num_hours()
}

/// Diagnoses a connector.
#[must_use]
pub fn diagnose(
    connector: &RawConnector,
    schema: &SchemaStatus,
    now: DateTime<Utc>,
    policy: &DiagnosisPolicy,
) -> Diagnosis {
    let health_state = normalize_connector(connector);
    let mut issues = Vec::new();

    if has_setup_failure(connector) {
        let state = connector.setup_state().unwrap_or_default();
        issues.push(Issue::new(
            IssueCategory::SetupFailure,
            format!("Setup is {state}"),
            vec!["status.setup_state"],
        ));
    }
    if let Some(issue) = sync_failure_issue(connector, now) {
        issues.push(issue);
    }
    if connector.sync_state() == Some("rescheduled") {
        issues.push(Issue::new(
            IssueCategory::SyncRescheduled,
            "Sync was rescheduled",
            vec!["status.sync_state"],
        ));
    }
    if connector.is_paused() {
        issues.push(Issue::new(
            IssueCategory::Paused,
            "Connector is paused",
            vec!["paused"],
        ));
    } else if let Some(issue) = stale_sync_issue(connector, now, policy) {
        issues.push(issue);
    }
    issues.extend(schema_warning_issues(connector, schema));
    if let Some(issue) = recent_failure_issue(connector, now, policy) {
        issues.push(issue);
    }
    if let Some(issue) = partially_disabled_issue(schema) {
        issues.push(issue);
    }
    if health_state == HealthState::Unknown {
        issues.push(Issue::new(
            IssueCategory::UnrecognizedStatus,
            format!(
                "Connector status could not be interpreted (setup_state: {}, sync_state: {})",
                connector.setup_state().unwrap_or("missing"),
                connector.sync_state().unwrap_or("missing"),
            ),
            vec!["status.setup_state", "status.sync_state"],
        ));
    }

    Diagnosis::from_issues(health_state, issues)
}

fn sync_failure_issue(connector: &RawConnector, now: DateTime<Utc>) -> Option<Issue> {
    if !has_sync_failure(connector) {
        return None;
    }

    let mut parts = Vec::new();
    let mut sources = Vec::new();
    if connector.sync_state() == Some("failed") {
        parts.push(connector.failed_at_utc().map_or_else(
            || "Last sync failed".to_owned(),
            |failed_at| {
                format!(
                    "Last sync failed {} hours ago",
                    hours_between(failed_at, now)
                )
            },
        ));
        sources.push("status.sync_state");
    }
    if let Some(reason) = &connector.failure_reason {
        parts.push(format!("Failure reason: {reason}"));
        sources.push("failure_reason");
    }
    let tasks = connector.tasks();
    if !tasks.is_empty() {
        parts.push(format!("{} blocking task(s) require action", tasks.len()));
        sources.push("status.tasks");
    }

    let issue = Issue::new(IssueCategory::SyncFailure, parts.join("; "), sources);
    Some(if tasks.is_empty() {
        issue
    } else {
        issue.with_details(Value::Array(tasks.to_vec()))
    })
}

fn stale_sync_issue(
    connector: &RawConnector,
    now: DateTime<Utc>,
    policy: &DiagnosisPolicy,
) -> Option<Issue> {
    match connector.succeeded_at_utc() {
        None => Some(Issue::new(
            IssueCategory::StaleSync,
            "No successful sync recorded",
            vec!["succeeded_at"],
        )),
        Some(succeeded_at) if now - succeeded_at > policy.stale_sync_window() => {
            Some(Issue::new(
                IssueCategory::StaleSync,
                format!(
                    "No successful sync in {} hours",
                    hours_between(succeeded_at, now)
                ),
                vec!["succeeded_at"],
            ))
        }
        Some(_) => None,
    }
}

fn schema_warning_issues(connector: &RawConnector, schema: &SchemaStatus) -> Vec<Issue> {
    let mut issues = Vec::new();
    let warnings = connector.warnings();
    if !warnings.is_empty() {
        let sample: Vec<Value> = warnings.iter().take(MAX_WARNING_DETAILS).cloned().collect();
        issues.push(
            Issue::new(
                IssueCategory::SchemaWarning,
                format!("{} active warning(s)", warnings.len()),
                vec!["status.warnings"],
            )
            .with_details(Value::Array(sample)),
        );
    }
    issues.extend(schema.schemas_without_enabled_tables().map(|entry| {
        let name = &entry.name;
        Issue::new(
            IssueCategory::SchemaWarning,
            format!("Schema '{name}' is enabled but syncs none of its tables"),
            vec!["schemas"],
        )
    }));
    issues
}

fn recent_failure_issue(
    connector: &RawConnector,
    now: DateTime<Utc>,
    policy: &DiagnosisPolicy,
) -> Option<Issue> {
    let failed_at = connector.failed_at_utc()?;
    let elapsed = now - failed_at;
    if has_sync_failure(connector)
        || elapsed < TimeDelta::zero()
        || elapsed >= policy.recent_failure_window()
    {
        return None;
    }
    Some(Issue::new(
        IssueCategory::RecentFailure,
        format!("Had a failure {} hours ago", elapsed.num_hours()),
        vec!["failed_at"],
    ))
}

fn partially_disabled_issue(schema: &SchemaStatus) -> Option<Issue> {
    let summary = schema.summary();
    if summary.total_tables == 0 || summary.disabled_tables * 2 <= summary.total_tables {
        return None;
    }
    Some(Issue::new(
        IssueCategory::SchemaPartiallyDisabled,
        format!(
            "{} of {} tables disabled",
            summary.disabled_tables, summary.total_tables
        ),
        vec!["schemas"],
    ))
}
