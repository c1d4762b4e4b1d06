//! Environment and status filtering over normalized collections.
//!
//! Filtering never reorders or fabricates entities: the output is always an
//! order-preserving subset of the input, so applying the same criteria twice
//! yields the same collection.

use super::{
    ConnectivityState, Group, GroupId, HealthState, InventoryDomainError, RawConnector,
    RawHybridAgent, normalize_agent, normalize_connector,
};
use serde::Serialize;
use std::collections::HashMap;

/// Sentinel status token that disables status filtering.
pub const ALL_STATUSES: &str = "all";

/// A closed set of normalized states that a status filter can select.
///
/// Tokens are parsed through the state's `TryFrom<&str>` implementation.
pub trait FilterState: Copy + PartialEq + Sized + 'static + for<'a> TryFrom<&'a str> {
    /// Every state, in the order accepted tokens are listed.
    const STATES: &'static [Self];

    /// Canonical token for the state.
    fn token(self) -> &'static str;
}

impl FilterState for HealthState {
    const STATES: &'static [Self] = &Self::ALL;

    fn token(self) -> &'static str {
        self.as_str()
    }
}

impl FilterState for ConnectivityState {
    const STATES: &'static [Self] = &Self::ALL;

    fn token(self) -> &'static str {
        self.as_str()
    }
}

/// Status predicate over a normalized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    /// Every state passes.
    #[default]
    All,
    /// Only the given state passes.
    Only(S),
}

impl<S: FilterState> StatusFilter<S> {
    /// Parses a caller-supplied status token.
    ///
    /// Absent, blank, and `all` tokens disable the filter. Matching is
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::InvalidStatusFilter`] listing the
    /// accepted tokens when the value is not recognized.
    pub fn parse(value: Option<&str>) -> Result<Self, InventoryDomainError> {
        let normalized = value
            .map(|token| token.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if normalized.is_empty() || normalized == ALL_STATUSES {
            return Ok(Self::All);
        }

        S::try_from(normalized.as_str())
            .map(Self::Only)
            .map_err(|_| InventoryDomainError::InvalidStatusFilter {
                value: value.unwrap_or_default().to_owned(),
                accepted: accepted_tokens::<S>(),
            })
    }

    /// Returns `true` when the state passes the filter.
    #[must_use]
    pub fn accepts(&self, state: S) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => *expected == state,
        }
    }

    /// Canonical token of the filter, `all` when disabled.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            Self::All => ALL_STATUSES,
            Self::Only(state) => state.token(),
        }
    }
}

fn accepted_tokens<S: FilterState>() -> String {
    std::iter::once(ALL_STATUSES)
        .chain(S::STATES.iter().map(|state| state.token()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment predicate over owning groups.
///
/// A group matches when its display name contains the token
/// case-insensitively, or when its identifier equals the token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvFilter {
    token: Option<String>,
}

impl EnvFilter {
    /// Creates an environment filter; blank tokens disable it.
    #[must_use]
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
        }
    }

    /// Returns the trimmed token when the filter is active.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns `true` when the filter is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Returns `true` when the group matches the token.
    ///
    /// An inactive filter matches every group.
    #[must_use]
    pub fn matches(&self, group: &Group) -> bool {
        self.token.as_deref().is_none_or(|token| {
            group.id.as_str() == token
                || group.name.to_lowercase().contains(&token.to_lowercase())
        })
    }

    /// Returns the groups selected by an active filter, in input order.
    #[must_use]
    pub fn matching_groups<'g>(&self, groups: &'g [Group]) -> Vec<&'g Group> {
        if !self.is_active() {
            return Vec::new();
        }
        groups.iter().filter(|group| self.matches(group)).collect()
    }
}

/// Entities that belong to a platform group.
pub trait GroupOwned {
    /// Returns the owning group, when reported.
    fn group_id(&self) -> Option<&GroupId>;
}

impl GroupOwned for RawConnector {
    fn group_id(&self) -> Option<&GroupId> {
        self.group_id.as_ref()
    }
}

impl GroupOwned for RawHybridAgent {
    fn group_id(&self) -> Option<&GroupId> {
        self.group_id.as_ref()
    }
}

/// A raw record paired with its normalized state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classified<R, S> {
    /// The raw platform record.
    pub record: R,
    /// State derived by normalization.
    pub state: S,
}

/// A connector with its derived health.
pub type ClassifiedConnector = Classified<RawConnector, HealthState>;

/// A hybrid agent with its derived connectivity.
pub type ClassifiedAgent = Classified<RawHybridAgent, ConnectivityState>;

impl ClassifiedConnector {
    /// Normalizes a raw connector.
    #[must_use]
    pub fn classify(record: RawConnector) -> Self {
        let state = normalize_connector(&record);
        Self { record, state }
    }
}

impl ClassifiedAgent {
    /// Normalizes a raw agent.
    #[must_use]
    pub fn classify(record: RawHybridAgent) -> Self {
        let state = normalize_agent(&record);
        Self { record, state }
    }
}

/// Conjunctive environment and status criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria<S> {
    /// Environment predicate.
    pub env: EnvFilter,
    /// Status predicate.
    pub status: StatusFilter<S>,
}

impl<S: FilterState> FilterCriteria<S> {
    /// Parses raw tool arguments into criteria.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryDomainError::InvalidStatusFilter`] when the status
    /// token is not recognized.
    pub fn parse(env: Option<&str>, status: Option<&str>) -> Result<Self, InventoryDomainError> {
        Ok(Self {
            env: EnvFilter::new(env),
            status: StatusFilter::parse(status)?,
        })
    }

    /// Keeps the entities that pass both predicates, preserving input order.
    ///
    /// While the environment filter is active, entities whose group cannot
    /// be resolved in `groups` are excluded.
    #[must_use]
    pub fn apply<R: GroupOwned>(
        &self,
        entities: Vec<Classified<R, S>>,
        groups: &[Group],
    ) -> Vec<Classified<R, S>> {
        let index: HashMap<&GroupId, &Group> =
            groups.iter().map(|group| (&group.id, group)).collect();

        entities
            .into_iter()
            .filter(|entity| self.status.accepts(entity.state))
            .filter(|entity| {
                !self.env.is_active()
                    || entity
                        .record
                        .group_id()
                        .and_then(|group_id| index.get(group_id))
                        .is_some_and(|group| self.env.matches(group))
            })
            .collect()
    }
}
