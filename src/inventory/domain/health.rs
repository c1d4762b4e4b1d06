//! Semantic health and connectivity states derived from raw platform status.

use super::{ParseConnectivityStateError, ParseHealthStateError, RawConnector, RawHybridAgent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Setup states the platform reports for a configured connector.
const KNOWN_SETUP_STATES: [&str; 3] = ["connected", "incomplete", "broken"];

/// Sync states the platform reports for a connector.
const KNOWN_SYNC_STATES: [&str; 5] = ["scheduled", "syncing", "paused", "rescheduled", "failed"];

/// Normalized health of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// Syncing normally.
    Healthy,
    /// Setup is broken or syncing is blocked.
    Failed,
    /// Syncing with non-fatal warnings.
    Warning,
    /// Paused by an operator.
    Paused,
    /// Status could not be interpreted.
    Unknown,
}

impl HealthState {
    /// All health states in their canonical order.
    pub const ALL: [Self; 5] = [
        Self::Healthy,
        Self::Failed,
        Self::Warning,
        Self::Paused,
        Self::Unknown,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Failed => "failed",
            Self::Warning => "warning",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for HealthState {
    type Error = ParseHealthStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| ParseHealthStateError(value.to_owned()))
    }
}

/// Normalized connectivity of a hybrid deployment agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// The agent holds an active session with the platform.
    Live,
    /// The agent is disconnected or has stopped sending heartbeats.
    Offline,
    /// Connectivity was not reported.
    Unknown,
}

impl ConnectivityState {
    /// All connectivity states in their canonical order.
    pub const ALL: [Self; 3] = [Self::Live, Self::Offline, Self::Unknown];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Offline => "offline",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ConnectivityState {
    type Error = ParseConnectivityStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| ParseConnectivityStateError(value.to_owned()))
    }
}

/// Returns `true` when setup is broken or incomplete.
#[must_use]
pub fn has_setup_failure(connector: &RawConnector) -> bool {
    matches!(connector.setup_state(), Some("broken" | "incomplete"))
}

/// Returns `true` when the connector reports an active sync failure.
///
/// A failed sync state, a fatal failure reason, or any outstanding blocking
/// task counts as an active failure.
#[must_use]
pub fn has_sync_failure(connector: &RawConnector) -> bool {
    connector.sync_state() == Some("failed")
        || connector.failure_reason.is_some()
        || !connector.tasks().is_empty()
}

/// Classifies a connector. First matching rule wins.
#[must_use]
pub fn normalize_connector(connector: &RawConnector) -> HealthState {
    if connector.is_paused() {
        return HealthState::Paused;
    }
    if has_setup_failure(connector) || has_sync_failure(connector) {
        return HealthState::Failed;
    }
    if !connector.warnings().is_empty() || connector.sync_state() == Some("rescheduled") {
        return HealthState::Warning;
    }

    let setup_known = connector
        .setup_state()
        .is_some_and(|state| KNOWN_SETUP_STATES.contains(&state));
    let sync_known = connector
        .sync_state()
        .is_some_and(|state| KNOWN_SYNC_STATES.contains(&state));
    if !setup_known || !sync_known {
        return HealthState::Unknown;
    }

    HealthState::Healthy
}

/// Classifies a hybrid agent's connectivity.
///
/// An explicit `online` flag takes precedence over a `status` token.
#[must_use]
pub fn normalize_agent(agent: &RawHybridAgent) -> ConnectivityState {
    match agent.online {
        Some(true) => return ConnectivityState::Live,
        Some(false) => return ConnectivityState::Offline,
        None => {}
    }

    let status = agent
        .status
        .as_deref()
        .map(|token| token.trim().to_ascii_lowercase());
    match status.as_deref() {
        Some("live" | "online" | "connected") => ConnectivityState::Live,
        Some("offline" | "disconnected") => ConnectivityState::Offline,
        _ => ConnectivityState::Unknown,
    }
}
