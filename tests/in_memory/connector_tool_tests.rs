//! Connector tool handler tests.

use super::helpers::{TestService, fetcher, service, service_over};
use connector_doctor::{
    inventory::{
        adapters::memory::{FetchOperation, InMemoryPlatformFetcher},
        domain::{ConnectorId, SchemaStatus},
        ports::FetchError,
    },
    tools::{
        handlers,
        params::{ConnectorIdParams, ListParams, SyncHistoryParams},
    },
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn ids(envelope: &Value, key: &str) -> Vec<String> {
    envelope
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn list(env: Option<&str>, status: Option<&str>) -> ListParams {
    ListParams {
        env: env.map(str::to_owned),
        status: status.map(str::to_owned),
    }
}

fn connector(id: &str) -> ConnectorIdParams {
    ConnectorIdParams {
        connector_id: Some(id.to_owned()),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_groups_returns_every_group(service: TestService) {
    let envelope = handlers::list_groups(&service).await;

    assert_eq!(envelope.get("status"), Some(&json!("success")));
    assert_eq!(envelope.get("count"), Some(&json!(3)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_prod_like_connectors_are_listed(service: TestService) {
    let envelope = handlers::list_connectors(&service, list(Some("prod"), Some("failed"))).await;

    assert_eq!(ids(&envelope, "connectors"), vec!["prod_pg", "pre_pg"]);
    assert_eq!(
        envelope.get("filters"),
        Some(&json!({
            "env": "prod",
            "status": "failed",
            "matched_groups": ["prod-us", "preprod"],
        }))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connector_rows_carry_health_and_links(service: TestService) {
    let envelope = handlers::list_connectors(&service, list(Some("dev"), None)).await;

    let row = envelope
        .get("connectors")
        .and_then(|rows| rows.get(0))
        .cloned()
        .unwrap_or_default();
    assert_eq!(
        row,
        json!({
            "id": "dev_pg",
            "service": "postgres",
            "schema": "dev_pg_schema",
            "group_id": "g_dev",
            "group_name": "dev",
            "health_state": "paused",
            "sync_state": "paused",
            "setup_state": "connected",
            "paused": true,
            "warning_count": 0,
            "dashboard_url": "https://fivetran.com/dashboard/connectors/dev_pg/status",
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrecognized_status_yields_error_envelope(service: TestService) {
    let envelope = handlers::list_connectors(&service, list(None, Some("sideways"))).await;

    assert_eq!(
        envelope,
        json!({
            "status": "error",
            "error": "Invalid status 'sideways'. Must be one of: all, healthy, failed, warning, paused, unknown",
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn diagnosing_broken_setup_fails(service: TestService) {
    let envelope = handlers::diagnose_connector(&service, connector("pre_pg")).await;

    assert_eq!(envelope.get("verdict"), Some(&json!("failed")));
    assert_eq!(envelope.get("health_state"), Some(&json!("failed")));
    let first_issue = envelope.pointer("/issues/0").cloned().unwrap_or_default();
    assert_eq!(first_issue.get("severity"), Some(&json!("critical")));
    assert_eq!(first_issue.get("category"), Some(&json!("setup-failure")));
    assert_eq!(
        envelope.pointer("/checks/setup_complete"),
        Some(&json!(false))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn diagnosing_paused_connector_is_degraded(service: TestService) {
    let envelope = handlers::diagnose_connector(&service, connector("dev_pg")).await;

    assert_eq!(envelope.get("health_state"), Some(&json!("paused")));
    assert_eq!(envelope.get("verdict"), Some(&json!("degraded")));
    assert_eq!(envelope.get("issue_count"), Some(&json!(1)));
    assert_eq!(
        envelope.get("recommendations"),
        Some(&json!([
            "Resume the connector if downstream consumers expect fresh data"
        ]))
    );
    assert_eq!(
        envelope.pointer("/summary/hours_since_success"),
        Some(&json!(2))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_connector_id_yields_error_envelope(service: TestService) {
    let envelope = handlers::diagnose_connector(&service, ConnectorIdParams::default()).await;

    assert_eq!(
        envelope,
        json!({"status": "error", "error": "connector_id is required and cannot be empty"})
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_connector_yields_hinted_error(service: TestService) {
    let envelope = handlers::get_sync_history(
        &service,
        SyncHistoryParams {
            connector_id: Some("nope".to_owned()),
            include_config: false,
        },
    )
    .await;

    assert_eq!(
        envelope,
        json!({
            "status": "error",
            "error": "Resource not found: connectors/nope",
            "hint": "Check the connector_id, group_id, or agent_id is correct",
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sync_history_of_clean_connector(service: TestService) {
    let envelope = handlers::get_sync_history(
        &service,
        SyncHistoryParams {
            connector_id: Some("prod_sf".to_owned()),
            include_config: false,
        },
    )
    .await;

    assert_eq!(envelope.get("last_failed_at"), Some(&Value::Null));
    assert_eq!(envelope.get("warnings"), Some(&json!([])));
    assert_eq!(envelope.get("hours_since_success"), Some(&json!(2)));
    assert_eq!(envelope.get("config"), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schema_status_reports_counts(fetcher: InMemoryPlatformFetcher) {
    let seeded = fetcher.set_schemas(
        ConnectorId::from_platform("prod_sf"),
        SchemaStatus::from_json(&json!({"schemas": {
            "crm": {"enabled": true, "tables": {
                "accounts": {"enabled": true, "sync_mode": "SOFT_DELETE"},
                "leads": {"enabled": false},
                "notes": {"enabled": false},
            }},
        }})),
    );
    assert!(seeded.is_ok());
    let service = service_over(fetcher);

    let envelope = handlers::get_connector_schema_status(&service, connector("prod_sf")).await;

    assert_eq!(envelope.get("schema_count"), Some(&json!(1)));
    assert_eq!(
        envelope.get("summary"),
        Some(&json!({"total_tables": 3, "enabled_tables": 1, "disabled_tables": 2}))
    );
    assert_eq!(
        envelope.pointer("/schemas/0/enabled_table_count"),
        Some(&json!(1))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upstream_failure_surfaces_as_error_envelope(fetcher: InMemoryPlatformFetcher) {
    let configured = fetcher.fail(
        FetchOperation::ListConnectors,
        FetchError::Server { status: 503 },
    );
    assert!(configured.is_ok());
    let service = service_over(fetcher);

    let envelope = handlers::list_connectors(&service, ListParams::default()).await;

    assert_eq!(envelope.get("status"), Some(&json!("error")));
    assert_eq!(
        envelope.get("hint"),
        Some(&json!("This is a Fivetran-side issue. Try again later"))
    );
}
