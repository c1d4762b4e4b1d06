//! Read-only platform fetch port.

use crate::inventory::domain::{
    AgentId, ConnectorId, Group, RawConnector, RawHybridAgent, SchemaStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for platform fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Read-only access to the platform's groups, connectors, and agents.
///
/// List operations return every page. Implementations never mutate platform
/// state and never retry.
#[async_trait]
pub trait PlatformFetcher: Send + Sync {
    /// Lists all groups.
    async fn list_groups(&self) -> FetchResult<Vec<Group>>;

    /// Lists all connectors visible to the credentials.
    async fn list_connectors(&self) -> FetchResult<Vec<RawConnector>>;

    /// Fetches a single connector's detail record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the connector does not exist.
    async fn get_connector(&self, id: &ConnectorId) -> FetchResult<RawConnector>;

    /// Fetches the schema tree of a connector.
    async fn get_connector_schemas(&self, id: &ConnectorId) -> FetchResult<SchemaStatus>;

    /// Lists all hybrid deployment agents.
    async fn list_hybrid_agents(&self) -> FetchResult<Vec<RawHybridAgent>>;

    /// Fetches a single hybrid agent's detail record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the agent does not exist.
    async fn get_hybrid_agent(&self, id: &AgentId) -> FetchResult<RawHybridAgent>;
}

/// Errors returned by platform fetch adapters.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The platform rejected the credentials (HTTP 401).
    #[error("Authentication failed")]
    Unauthorized,

    /// The credentials lack permission for the resource (HTTP 403).
    #[error("Access forbidden")]
    Forbidden,

    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found: {endpoint}")]
    NotFound {
        /// Endpoint path that was requested.
        endpoint: String,
    },

    /// The platform throttled the request (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The platform failed to serve the request (HTTP 5xx).
    #[error("Fivetran server error (HTTP {status})")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// Any other non-success response.
    #[error("API error: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by the platform, or the raw body.
        message: String,
    },

    /// The configured API root is not a usable URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The response envelope could not be interpreted.
    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed {
        /// Endpoint path that was requested.
        endpoint: String,
        /// What was wrong with the body.
        reason: String,
    },
}

impl FetchError {
    /// Wraps a transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Maps a non-success HTTP status to a typed error.
    #[must_use]
    pub fn from_status(status: u16, endpoint: &str, message: impl Into<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound {
                endpoint: endpoint.to_owned(),
            },
            429 => Self::RateLimited,
            500..=599 => Self::Server { status },
            _ => Self::Api {
                status,
                message: message.into(),
            },
        }
    }

    /// Operator guidance for resolving the failure.
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::Network(_) => "Check network connectivity and FIVETRAN_BASE_URL",
            Self::InvalidBaseUrl { .. } => "Check FIVETRAN_BASE_URL is an absolute http(s) URL",
            Self::Unauthorized => "Check FIVETRAN_API_KEY and FIVETRAN_API_SECRET are correct",
            Self::Forbidden => "Your API key may not have permission for this resource",
            Self::NotFound { .. } => "Check the connector_id, group_id, or agent_id is correct",
            Self::RateLimited => "Too many requests. Wait a moment and try again",
            Self::Server { .. } => "This is a Fivetran-side issue. Try again later",
            Self::Api { .. } | Self::Malformed { .. } => "Check the Fivetran API documentation",
        }
    }
}
