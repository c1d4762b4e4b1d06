//! Shared fixtures for integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use connector_doctor::inventory::{
    adapters::memory::InMemoryPlatformFetcher,
    domain::{Group, RawConnector},
};
use mockable::Clock;
use serde_json::{Value, json};

/// Clock pinned to 2024-01-15T12:00:00Z.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock;

impl FixedClock {
    /// The pinned instant.
    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Self::instant().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Raw connector payload with the given status block.
pub fn connector_json(id: &str, group: &str, paused: bool, status: Value) -> Value {
    json!({
        "id": id,
        "group_id": group,
        "service": "postgres",
        "schema": format!("{id}_schema"),
        "paused": paused,
        "succeeded_at": "2024-01-15T10:00:00Z",
        "status": status,
    })
}

/// Inserts a connector with the given status into the fetcher.
pub fn seed_connector(
    fetcher: &InMemoryPlatformFetcher,
    id: &str,
    group: &str,
    paused: bool,
    status: Value,
) -> Result<(), eyre::Report> {
    fetcher
        .insert_connector(RawConnector::from_json(&connector_json(
            id, group, paused, status,
        )))
        .map_err(|err| eyre::eyre!("seed connector {id}: {err}"))
}

/// Inserts the standard production, pre-production, and development groups.
pub fn seed_environment_groups(fetcher: &InMemoryPlatformFetcher) -> Result<(), eyre::Report> {
    for (id, name) in [("g_prod", "prod-us"), ("g_pre", "preprod"), ("g_dev", "dev")] {
        fetcher
            .insert_group(Group::new(id, name))
            .map_err(|err| eyre::eyre!("seed group {id}: {err}"))?;
    }
    Ok(())
}
