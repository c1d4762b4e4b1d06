//! In-memory platform fetcher for tests and offline runs.

use crate::inventory::{
    domain::{AgentId, ConnectorId, Group, RawConnector, RawHybridAgent, SchemaStatus},
    ports::{FetchError, FetchResult, PlatformFetcher},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fetch operations whose outcome can be overridden with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchOperation {
    /// [`PlatformFetcher::list_groups`].
    ListGroups,
    /// [`PlatformFetcher::list_connectors`].
    ListConnectors,
    /// [`PlatformFetcher::get_connector`].
    GetConnector,
    /// [`PlatformFetcher::get_connector_schemas`].
    GetConnectorSchemas,
    /// [`PlatformFetcher::list_hybrid_agents`].
    ListHybridAgents,
    /// [`PlatformFetcher::get_hybrid_agent`].
    GetHybridAgent,
}

/// Platform fetcher serving fixed records from memory.
///
/// Connector and agent detail lookups fall back to the listed record when no
/// dedicated detail record was inserted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlatformFetcher {
    state: Arc<RwLock<InMemoryPlatformState>>,
}

#[derive(Debug, Default)]
struct InMemoryPlatformState {
    groups: Vec<Group>,
    connectors: Vec<RawConnector>,
    connector_details: HashMap<ConnectorId, RawConnector>,
    schemas: HashMap<ConnectorId, SchemaStatus>,
    agents: Vec<RawHybridAgent>,
    agent_details: HashMap<AgentId, RawHybridAgent>,
    failures: HashMap<FetchOperation, FetchError>,
}

impl InMemoryPlatformFetcher {
    /// Creates an empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> FetchResult<RwLockReadGuard<'_, InMemoryPlatformState>> {
        self.state
            .read()
            .map_err(|err| FetchError::network(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> FetchResult<RwLockWriteGuard<'_, InMemoryPlatformState>> {
        self.state
            .write()
            .map_err(|err| FetchError::network(std::io::Error::other(err.to_string())))
    }

    /// Appends a group to the listing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn insert_group(&self, group: Group) -> FetchResult<()> {
        self.write()?.groups.push(group);
        Ok(())
    }

    /// Appends a connector to the listing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn insert_connector(&self, connector: RawConnector) -> FetchResult<()> {
        self.write()?.connectors.push(connector);
        Ok(())
    }

    /// Sets the detail record returned for a connector, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn set_connector_detail(&self, connector: RawConnector) -> FetchResult<()> {
        self.write()?
            .connector_details
            .insert(connector.id.clone(), connector);
        Ok(())
    }

    /// Sets the schema tree of a connector.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn set_schemas(&self, id: ConnectorId, schemas: SchemaStatus) -> FetchResult<()> {
        self.write()?.schemas.insert(id, schemas);
        Ok(())
    }

    /// Appends an agent to the listing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn insert_agent(&self, agent: RawHybridAgent) -> FetchResult<()> {
        self.write()?.agents.push(agent);
        Ok(())
    }

    /// Sets the detail record returned for an agent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn set_agent_detail(&self, agent: RawHybridAgent) -> FetchResult<()> {
        self.write()?.agent_details.insert(agent.id.clone(), agent);
        Ok(())
    }

    /// Makes every subsequent call of `operation` fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when lock acquisition fails.
    pub fn fail(&self, operation: FetchOperation, error: FetchError) -> FetchResult<()> {
        self.write()?.failures.insert(operation, error);
        Ok(())
    }
}

impl InMemoryPlatformState {
    fn check(&self, operation: FetchOperation) -> FetchResult<()> {
        self.failures
            .get(&operation)
            .map_or(Ok(()), |error| Err(error.clone()))
    }

    fn connector(&self, id: &ConnectorId) -> Option<&RawConnector> {
        self.connector_details
            .get(id)
            .or_else(|| self.connectors.iter().find(|connector| &connector.id == id))
    }
}

#[async_trait]
impl PlatformFetcher for InMemoryPlatformFetcher {
    async fn list_groups(&self) -> FetchResult<Vec<Group>> {
        let state = self.read()?;
        state.check(FetchOperation::ListGroups)?;
        Ok(state.groups.clone())
    }

    async fn list_connectors(&self) -> FetchResult<Vec<RawConnector>> {
        let state = self.read()?;
        state.check(FetchOperation::ListConnectors)?;
        Ok(state.connectors.clone())
    }

    async fn get_connector(&self, id: &ConnectorId) -> FetchResult<RawConnector> {
        let state = self.read()?;
        state.check(FetchOperation::GetConnector)?;
        state
            .connector(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                endpoint: format!("connectors/{id}"),
            })
    }

    async fn get_connector_schemas(&self, id: &ConnectorId) -> FetchResult<SchemaStatus> {
        let state = self.read()?;
        state.check(FetchOperation::GetConnectorSchemas)?;
        if let Some(schemas) = state.schemas.get(id) {
            return Ok(schemas.clone());
        }
        state
            .connector(id)
            .map(|_| SchemaStatus::default())
            .ok_or_else(|| FetchError::NotFound {
                endpoint: format!("connectors/{id}/schemas"),
            })
    }

    async fn list_hybrid_agents(&self) -> FetchResult<Vec<RawHybridAgent>> {
        let state = self.read()?;
        state.check(FetchOperation::ListHybridAgents)?;
        Ok(state.agents.clone())
    }

    async fn get_hybrid_agent(&self, id: &AgentId) -> FetchResult<RawHybridAgent> {
        let state = self.read()?;
        state.check(FetchOperation::GetHybridAgent)?;
        state
            .agent_details
            .get(id)
            .or_else(|| state.agents.iter().find(|agent| &agent.id == id))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                endpoint: format!("local-processing-agents/{id}"),
            })
    }
}
