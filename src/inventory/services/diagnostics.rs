//! Read-only diagnostics over platform connectors and hybrid agents.

use super::reports::{
    AgentDetailReport, AgentSummary, AgentsReport, AppliedFilters, ConnectorSummary,
    ConnectorsReport, DiagnosisChecks, DiagnosisReport, DiagnosisSummary, GroupsReport,
    SchemaStatusReport, SchemaView, SyncHistoryReport, dashboard_url,
};
use crate::inventory::{
    domain::{
        AgentId, ClassifiedAgent, ClassifiedConnector, ConnectivityState, ConnectorId,
        DiagnosisPolicy, EnvFilter, FilterCriteria, FilterState, Group, HealthState,
        InventoryDomainError, RawConnector, RawHybridAgent, StatusFilter, diagnose, hours_between,
    },
    ports::{FetchError, PlatformFetcher},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for diagnostics operations.
#[derive(Debug, Error)]
pub enum DiagnosticsServiceError {
    /// Caller-supplied arguments were rejected.
    #[error(transparent)]
    Domain(#[from] InventoryDomainError),
    /// The platform could not be queried.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl DiagnosticsServiceError {
    /// Operator guidance for fetch failures.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Domain(_) => None,
            Self::Fetch(err) => Some(err.hint()),
        }
    }
}

/// Result type for diagnostics service operations.
pub type DiagnosticsResult<T> = Result<T, DiagnosticsServiceError>;

/// Diagnostics orchestration service.
///
/// Every operation is an independent read: fetch, normalize, filter or
/// diagnose, and shape. Nothing is cached between calls.
#[derive(Clone)]
pub struct DiagnosticsService<F, C>
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    fetcher: Arc<F>,
    clock: Arc<C>,
    policy: DiagnosisPolicy,
}

impl<F, C> DiagnosticsService<F, C>
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new diagnostics service.
    #[must_use]
    pub const fn new(fetcher: Arc<F>, clock: Arc<C>, policy: DiagnosisPolicy) -> Self {
        Self {
            fetcher,
            clock,
            policy,
        }
    }

    /// Returns the diagnosis policy in use.
    #[must_use]
    pub const fn policy(&self) -> &DiagnosisPolicy {
        &self.policy
    }

    /// Lists every group.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Fetch`] when the listing fails.
    pub async fn list_groups(&self) -> DiagnosticsResult<GroupsReport> {
        let groups = self.fetcher.list_groups().await?;
        Ok(GroupsReport {
            count: groups.len(),
            groups,
        })
    }

    /// Lists connectors with normalized health, filtered by environment and
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Domain`] for an unrecognized status
    /// token, before any fetch, and [`DiagnosticsServiceError::Fetch`] when
    /// the group or connector listing fails.
    pub async fn list_connectors(
        &self,
        env: Option<&str>,
        status: Option<&str>,
    ) -> DiagnosticsResult<ConnectorsReport> {
        let criteria = FilterCriteria::<HealthState>::parse(env, status)?;
        let (groups, connectors) =
            tokio::try_join!(self.fetcher.list_groups(), self.fetcher.list_connectors())?;

        let classified = connectors
            .into_iter()
            .map(ClassifiedConnector::classify)
            .collect();
        let summaries: Vec<ConnectorSummary> = criteria
            .apply(classified, &groups)
            .into_iter()
            .map(|connector| ConnectorSummary::new(connector, &groups))
            .collect();
        debug!(count = summaries.len(), "listed connectors");

        Ok(ConnectorsReport {
            count: summaries.len(),
            connectors: summaries,
            filters: applied_filters(&criteria, &groups),
        })
    }

    /// Returns the schema tree of a connector with table counts.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Domain`] for a blank identifier and
    /// [`DiagnosticsServiceError::Fetch`] when the schema fetch fails.
    pub async fn get_connector_schema_status(
        &self,
        connector_id: Option<&str>,
    ) -> DiagnosticsResult<SchemaStatusReport> {
        let id = ConnectorId::parse(connector_id)?;
        let status = self.fetcher.get_connector_schemas(&id).await?;
        let schemas: Vec<SchemaView> = status.schemas().iter().map(SchemaView::from).collect();
        Ok(SchemaStatusReport {
            dashboard_url: dashboard_url(&id),
            connector_id: id,
            schema_count: schemas.len(),
            schemas,
            summary: status.summary(),
        })
    }

    /// Diagnoses a connector from its detail record and schema tree.
    ///
    /// The schema tree is only fetched once the detail fetch has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Domain`] for a blank identifier and
    /// [`DiagnosticsServiceError::Fetch`] when either fetch fails.
    pub async fn diagnose_connector(
        &self,
        connector_id: Option<&str>,
    ) -> DiagnosticsResult<DiagnosisReport> {
        let id = ConnectorId::parse(connector_id)?;
        let connector = self.fetcher.get_connector(&id).await?;
        let schema = self.fetcher.get_connector_schemas(&id).await?;

        let now = self.clock.utc();
        let recent_window = self.policy.recent_failure_window();
        let diagnosis = diagnose(&connector, &schema, now, &self.policy);
        let tables = schema.summary();
        let checks = DiagnosisChecks {
            is_paused: connector.is_paused(),
            is_syncing: connector.sync_state() == Some("syncing"),
            setup_complete: connector.setup_state() == Some("connected"),
            has_warnings: !connector.warnings().is_empty(),
            has_recent_failure: connector
                .failed_at_utc()
                .is_some_and(|failed_at| within(failed_at, now, recent_window)),
            tables_total: tables.total_tables,
            tables_enabled: tables.enabled_tables,
            tables_disabled: tables.disabled_tables,
        };
        debug!(
            connector_id = %id,
            verdict = %diagnosis.verdict(),
            issues = diagnosis.issues().len(),
            "diagnosed connector"
        );

        Ok(DiagnosisReport {
            dashboard_url: dashboard_url(&id),
            health_state: diagnosis.health_state(),
            verdict: diagnosis.verdict(),
            issue_count: diagnosis.issues().len(),
            issues: diagnosis.issues().to_vec(),
            recommendations: diagnosis.recommendations().to_vec(),
            summary: diagnosis_summary(&connector, now),
            checks,
            connector_id: id,
        })
    }

    /// Reports sync timing and scheduling for a connector.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Domain`] for a blank identifier and
    /// [`DiagnosticsServiceError::Fetch`] when the detail fetch fails.
    pub async fn get_sync_history(
        &self,
        connector_id: Option<&str>,
        include_config: bool,
    ) -> DiagnosticsResult<SyncHistoryReport> {
        let id = ConnectorId::parse(connector_id)?;
        let connector = self.fetcher.get_connector(&id).await?;
        let now = self.clock.utc();

        Ok(SyncHistoryReport {
            connector_id: id,
            hours_since_success: connector
                .succeeded_at_utc()
                .map(|at| hours_between(at, now)),
            hours_since_failure: connector.failed_at_utc().map(|at| hours_between(at, now)),
            sync_state: connector.sync_state().map(str::to_owned),
            warnings: connector.warnings().to_vec(),
            config: include_config.then(|| connector.config.clone().unwrap_or(Value::Null)),
            last_succeeded_at: connector.succeeded_at,
            last_failed_at: connector.failed_at,
            sync_frequency: connector.sync_frequency,
            schedule_type: connector.schedule_type,
        })
    }

    /// Lists hybrid agents with normalized connectivity, filtered by
    /// environment and status.
    ///
    /// While a status filter is active, agents listed without connectivity
    /// data are resolved through their detail record. A failed detail fetch
    /// leaves the agent unknown.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Domain`] for an unrecognized status
    /// token and [`DiagnosticsServiceError::Fetch`] when a listing fails.
    pub async fn list_hybrid_agents(
        &self,
        env: Option<&str>,
        status: Option<&str>,
    ) -> DiagnosticsResult<AgentsReport> {
        let criteria = FilterCriteria::<ConnectivityState>::parse(env, status)?;
        let groups = if criteria.env.is_active() {
            self.fetcher.list_groups().await?
        } else {
            Vec::new()
        };
        let listed = self.fetcher.list_hybrid_agents().await?;

        let resolve_missing = matches!(criteria.status, StatusFilter::Only(_));
        let mut classified = Vec::with_capacity(listed.len());
        for agent in listed {
            let resolved = if resolve_missing && !agent.has_connectivity() {
                self.resolve_connectivity(agent).await
            } else {
                agent
            };
            classified.push(ClassifiedAgent::classify(resolved));
        }

        let agents: Vec<AgentSummary> = criteria
            .apply(classified, &groups)
            .into_iter()
            .map(AgentSummary::from)
            .collect();
        debug!(count = agents.len(), "listed hybrid agents");

        Ok(AgentsReport {
            count: agents.len(),
            agents,
            filters: applied_filters(&criteria, &groups),
        })
    }

    /// Returns a hybrid agent with normalized connectivity and usage.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsServiceError::Domain`] for a blank identifier and
    /// [`DiagnosticsServiceError::Fetch`] when the detail fetch fails.
    pub async fn get_hybrid_agent_details(
        &self,
        agent_id: Option<&str>,
    ) -> DiagnosticsResult<AgentDetailReport> {
        let id = AgentId::parse(agent_id)?;
        let agent = self.fetcher.get_hybrid_agent(&id).await?;
        Ok(AgentDetailReport::from(ClassifiedAgent::classify(agent)))
    }

    async fn resolve_connectivity(&self, listed: RawHybridAgent) -> RawHybridAgent {
        match self.fetcher.get_hybrid_agent(&listed.id).await {
            Ok(detail) if detail.has_connectivity() => RawHybridAgent {
                online: detail.online,
                status: detail.status,
                ..listed
            },
            Ok(_) => listed,
            Err(err) => {
                warn!(agent_id = %listed.id, error = %err, "agent connectivity unresolved");
                listed
            }
        }
    }
}

fn within(at: DateTime<Utc>, now: DateTime<Utc>, window: TimeDelta) -> bool {
    let elapsed = now - at;
    elapsed >= TimeDelta::zero() && elapsed < window
}

fn diagnosis_summary(connector: &RawConnector, now: DateTime<Utc>) -> DiagnosisSummary {
    DiagnosisSummary {
        service: connector.service.clone(),
        schema: connector.schema.clone(),
        group_id: connector.group_id.clone(),
        setup_state: connector.setup_state().map(str::to_owned),
        sync_state: connector.sync_state().map(str::to_owned),
        paused: connector.is_paused(),
        succeeded_at: connector.succeeded_at.clone(),
        failed_at: connector.failed_at.clone(),
        hours_since_success: connector
            .succeeded_at_utc()
            .map(|at| hours_between(at, now)),
        hours_since_failure: connector.failed_at_utc().map(|at| hours_between(at, now)),
    }
}

fn applied_filters<S: FilterState>(
    criteria: &FilterCriteria<S>,
    groups: &[Group],
) -> AppliedFilters {
    let env: &EnvFilter = &criteria.env;
    AppliedFilters {
        env: env.token().map(str::to_owned),
        status: criteria.status.token(),
        matched_groups: env.is_active().then(|| {
            env.matching_groups(groups)
                .into_iter()
                .map(|group| group.name.clone())
                .collect()
        }),
    }
}
