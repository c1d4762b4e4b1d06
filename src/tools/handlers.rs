//! Boundary adapters: one function per tool.
//!
//! Each handler validates nothing itself. It forwards raw arguments to the
//! diagnostics service, logs the outcome, and shapes the result into a
//! [`ToolEnvelope`]. Failures never escape as errors.

use super::{
    envelope::ToolEnvelope,
    params::{AgentIdParams, ConnectorIdParams, ListParams, SyncHistoryParams},
};
use crate::inventory::{
    ports::PlatformFetcher,
    services::{DiagnosticsService, DiagnosticsServiceError},
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

fn respond<T: Serialize>(tool: &'static str, result: Result<T, DiagnosticsServiceError>) -> Value {
    match &result {
        Ok(_) => info!(tool, "tool call succeeded"),
        Err(err) => warn!(tool, error = %err, "tool call failed"),
    }
    ToolEnvelope::from_result(result).into_value()
}

/// Handles `list_groups`.
pub async fn list_groups<F, C>(service: &DiagnosticsService<F, C>) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    respond("list_groups", service.list_groups().await)
}

/// Handles `list_connectors`.
pub async fn list_connectors<F, C>(service: &DiagnosticsService<F, C>, params: ListParams) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    let result = service
        .list_connectors(params.env.as_deref(), params.status.as_deref())
        .await;
    respond("list_connectors", result)
}

/// Handles `get_connector_schema_status`.
pub async fn get_connector_schema_status<F, C>(
    service: &DiagnosticsService<F, C>,
    params: ConnectorIdParams,
) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    let result = service
        .get_connector_schema_status(params.connector_id.as_deref())
        .await;
    respond("get_connector_schema_status", result)
}

/// Handles `diagnose_connector`.
pub async fn diagnose_connector<F, C>(
    service: &DiagnosticsService<F, C>,
    params: ConnectorIdParams,
) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    let result = service
        .diagnose_connector(params.connector_id.as_deref())
        .await;
    respond("diagnose_connector", result)
}

/// Handles `get_sync_history`.
pub async fn get_sync_history<F, C>(
    service: &DiagnosticsService<F, C>,
    params: SyncHistoryParams,
) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    let result = service
        .get_sync_history(params.connector_id.as_deref(), params.include_config)
        .await;
    respond("get_sync_history", result)
}

/// Handles `list_hybrid_agents`.
pub async fn list_hybrid_agents<F, C>(
    service: &DiagnosticsService<F, C>,
    params: ListParams,
) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    let result = service
        .list_hybrid_agents(params.env.as_deref(), params.status.as_deref())
        .await;
    respond("list_hybrid_agents", result)
}

/// Handles `get_hybrid_agent_details`.
pub async fn get_hybrid_agent_details<F, C>(
    service: &DiagnosticsService<F, C>,
    params: AgentIdParams,
) -> Value
where
    F: PlatformFetcher + ?Sized,
    C: Clock + Send + Sync,
{
    let result = service
        .get_hybrid_agent_details(params.agent_id.as_deref())
        .await;
    respond("get_hybrid_agent_details", result)
}
