//! Hybrid agent tool handler tests.

use super::helpers::service_over;
use connector_doctor::{
    inventory::{
        adapters::memory::InMemoryPlatformFetcher,
        domain::{Group, RawHybridAgent},
    },
    tools::{
        handlers,
        params::{AgentIdParams, ListParams},
    },
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn fetcher() -> InMemoryPlatformFetcher {
    let fetcher = InMemoryPlatformFetcher::new();
    let agents = [
        json!({"id": "a_prod", "display_name": "prod-agent", "group_id": "g_prod",
               "online": true, "usage": [{"connector_id": "c1"}]}),
        json!({"id": "a_dev", "display_name": "dev-agent", "group_id": "g_dev",
               "status": "offline"}),
        json!({"id": "a_mystery", "group_id": "g_dev"}),
    ];
    let seeded = fetcher
        .insert_group(Group::new("g_prod", "Production"))
        .and_then(|()| fetcher.insert_group(Group::new("g_dev", "Development")))
        .and_then(|()| {
            agents.iter().try_for_each(|agent| {
                fetcher.insert_agent(RawHybridAgent::from_json(agent))
            })
        });
    assert!(seeded.is_ok(), "fixture seeding failed: {seeded:?}");
    fetcher
}

fn agent_ids(envelope: &Value) -> Vec<&str> {
    envelope
        .get("agents")
        .and_then(Value::as_array)
        .map(|agents| {
            agents
                .iter()
                .filter_map(|agent| agent.get("id").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
#[case(None, None, vec!["a_prod", "a_dev", "a_mystery"])]
#[case(Some("prod"), None, vec!["a_prod"])]
#[case(None, Some("offline"), vec!["a_dev"])]
#[case(None, Some("unknown"), vec!["a_mystery"])]
#[case(Some("DEV"), Some("live"), vec![])]
#[tokio::test(flavor = "multi_thread")]
async fn agents_are_filtered(
    fetcher: InMemoryPlatformFetcher,
    #[case] env: Option<&str>,
    #[case] status: Option<&str>,
    #[case] expected: Vec<&str>,
) {
    let service = service_over(fetcher);
    let envelope = handlers::list_hybrid_agents(
        &service,
        ListParams {
            env: env.map(str::to_owned),
            status: status.map(str::to_owned),
        },
    )
    .await;

    assert_eq!(envelope.get("status"), Some(&json!("success")));
    assert_eq!(agent_ids(&envelope), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_agent_status_lists_accepted_values(fetcher: InMemoryPlatformFetcher) {
    let service = service_over(fetcher);
    let envelope = handlers::list_hybrid_agents(
        &service,
        ListParams {
            env: None,
            status: Some("asleep".to_owned()),
        },
    )
    .await;

    assert_eq!(
        envelope.get("error"),
        Some(&json!("Invalid status 'asleep'. Must be one of: all, live, offline, unknown"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_details_include_usage(fetcher: InMemoryPlatformFetcher) {
    let service = service_over(fetcher);
    let envelope = handlers::get_hybrid_agent_details(
        &service,
        AgentIdParams {
            agent_id: Some("a_prod".to_owned()),
        },
    )
    .await;

    assert_eq!(
        envelope,
        json!({
            "status": "success",
            "agent_id": "a_prod",
            "display_name": "prod-agent",
            "group_id": "g_prod",
            "connectivity_state": "live",
            "registered_at": null,
            "connector_count": 1,
            "usage": [{"connector_id": "c1"}],
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_agent_id_is_rejected(fetcher: InMemoryPlatformFetcher) {
    let service = service_over(fetcher);
    let envelope = handlers::get_hybrid_agent_details(
        &service,
        AgentIdParams {
            agent_id: Some("  ".to_owned()),
        },
    )
    .await;

    assert_eq!(
        envelope.get("error"),
        Some(&json!("agent_id is required and cannot be empty"))
    );
}
