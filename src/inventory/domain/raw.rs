//! Raw platform records with total, defensive field extraction.
//!
//! The platform API returns loosely shaped JSON. Every record here is built
//! from a [`serde_json::Value`] without failing: a missing field, or a field
//! of an unexpected JSON type, is recorded as absent. Normalization then
//! degrades such records to an unknown state instead of aborting a listing.

use super::{AgentId, ConnectorId, GroupId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A platform group (destination), used as an environment proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Group identifier.
    pub id: GroupId,
    /// Display name matched against environment tokens.
    pub name: String,
    /// Creation timestamp as reported by the platform.
    pub created_at: Option<String>,
}

impl Group {
    /// Creates a group from its identifier and display name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: GroupId::from_platform(id),
            name: name.into(),
            created_at: None,
        }
    }

    /// Extracts a group from a raw platform item.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let object = value.as_object();
        Self {
            id: GroupId::from_platform(str_field(object, "id").unwrap_or_default()),
            name: str_field(object, "name").unwrap_or_default(),
            created_at: str_field(object, "created_at"),
        }
    }
}

/// Raw `status` block of a connector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawConnectorStatus {
    /// Sync state token (`scheduled`, `syncing`, `rescheduled`, ...).
    pub sync_state: Option<String>,
    /// Setup state token (`connected`, `incomplete`, `broken`).
    pub setup_state: Option<String>,
    /// Blocking tasks the operator must resolve before syncing resumes.
    pub tasks: Vec<Value>,
    /// Non-fatal warnings reported by the platform.
    pub warnings: Vec<Value>,
}

impl RawConnectorStatus {
    fn from_object(map: &Map<String, Value>) -> Self {
        let object = Some(map);
        Self {
            sync_state: str_field(object, "sync_state"),
            setup_state: str_field(object, "setup_state"),
            tasks: array_field(object, "tasks"),
            warnings: array_field(object, "warnings"),
        }
    }
}

/// Connector record as reported by the platform, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawConnector {
    /// Connector identifier; empty when the platform omitted it.
    pub id: ConnectorId,
    /// Connector type, for example `postgres` or `salesforce`.
    pub service: Option<String>,
    /// Destination schema name.
    pub schema: Option<String>,
    /// Owning group.
    pub group_id: Option<GroupId>,
    /// Whether the connector is paused.
    pub paused: Option<bool>,
    /// Status block; absent when missing or not an object.
    pub status: Option<RawConnectorStatus>,
    /// Fatal failure description, when the platform reports one.
    pub failure_reason: Option<String>,
    /// Timestamp of the last successful sync.
    pub succeeded_at: Option<String>,
    /// Timestamp of the last failed sync.
    pub failed_at: Option<String>,
    /// Sync frequency in minutes.
    pub sync_frequency: Option<u64>,
    /// Schedule type (`auto` or `manual`).
    pub schedule_type: Option<String>,
    /// Connector configuration object.
    pub config: Option<Value>,
}

impl RawConnector {
    /// Extracts a connector from a raw platform item.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let object = value.as_object();
        Self {
            id: ConnectorId::from_platform(str_field(object, "id").unwrap_or_default()),
            service: str_field(object, "service"),
            schema: str_field(object, "schema"),
            group_id: str_field(object, "group_id").map(GroupId::from_platform),
            paused: bool_field(object, "paused"),
            status: object
                .and_then(|map| map.get("status"))
                .and_then(Value::as_object)
                .map(RawConnectorStatus::from_object),
            failure_reason: str_field(object, "failure_reason")
                .filter(|reason| !reason.trim().is_empty()),
            succeeded_at: str_field(object, "succeeded_at"),
            failed_at: str_field(object, "failed_at"),
            sync_frequency: object
                .and_then(|map| map.get("sync_frequency"))
                .and_then(Value::as_u64),
            schedule_type: str_field(object, "schedule_type"),
            config: object
                .and_then(|map| map.get("config"))
                .filter(|config| config.is_object())
                .cloned(),
        }
    }

    /// Returns `true` only when the platform explicitly reports a pause.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.unwrap_or(false)
    }

    /// Returns the sync state token, if reported.
    #[must_use]
    pub fn sync_state(&self) -> Option<&str> {
        self.status.as_ref()?.sync_state.as_deref()
    }

    /// Returns the setup state token, if reported.
    #[must_use]
    pub fn setup_state(&self) -> Option<&str> {
        self.status.as_ref()?.setup_state.as_deref()
    }

    /// Returns reported warnings, empty when none.
    #[must_use]
    pub fn warnings(&self) -> &[Value] {
        self.status
            .as_ref()
            .map(|status| status.warnings.as_slice())
            .unwrap_or_default()
    }

    /// Returns reported blocking tasks, empty when none.
    #[must_use]
    pub fn tasks(&self) -> &[Value] {
        self.status
            .as_ref()
            .map(|status| status.tasks.as_slice())
            .unwrap_or_default()
    }

    /// Parsed timestamp of the last successful sync.
    #[must_use]
    pub fn succeeded_at_utc(&self) -> Option<DateTime<Utc>> {
        self.succeeded_at.as_deref().and_then(parse_timestamp)
    }

    /// Parsed timestamp of the last failed sync.
    #[must_use]
    pub fn failed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.failed_at.as_deref().and_then(parse_timestamp)
    }
}

/// Hybrid deployment agent record as reported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawHybridAgent {
    /// Agent identifier; empty when the platform omitted it.
    pub id: AgentId,
    /// Human-readable agent name.
    pub display_name: Option<String>,
    /// Owning group.
    pub group_id: Option<GroupId>,
    /// Explicit online flag.
    pub online: Option<bool>,
    /// Connectivity status token, used when no online flag is present.
    pub status: Option<String>,
    /// Registration timestamp.
    pub registered_at: Option<String>,
    /// Connectors assigned to the agent.
    pub usage: Vec<Value>,
}

impl RawHybridAgent {
    /// Extracts an agent from a raw platform item.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let object = value.as_object();
        Self {
            id: AgentId::from_platform(str_field(object, "id").unwrap_or_default()),
            display_name: str_field(object, "display_name"),
            group_id: str_field(object, "group_id").map(GroupId::from_platform),
            online: bool_field(object, "online"),
            status: str_field(object, "status"),
            registered_at: str_field(object, "registered_at"),
            usage: array_field(object, "usage"),
        }
    }

    /// Returns `true` when the record carries any connectivity signal.
    #[must_use]
    pub const fn has_connectivity(&self) -> bool {
        self.online.is_some() || self.status.is_some()
    }
}

/// Parses an ISO-8601 timestamp into UTC.
///
/// Returns `None` for empty or unparseable input.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

fn str_field(object: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    object?.get(key)?.as_str().map(str::to_owned)
}

fn bool_field(object: Option<&Map<String, Value>>, key: &str) -> Option<bool> {
    object?.get(key)?.as_bool()
}

fn array_field(object: Option<&Map<String, Value>>, key: &str) -> Vec<Value> {
    object
        .and_then(|map| map.get(key))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
