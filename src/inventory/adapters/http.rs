//! REST adapter for the Fivetran platform API.
//!
//! Requests use HTTP basic authentication. List endpoints are cursor
//! paginated: each page carries `data.items` and an optional
//! `data.next_cursor`, and the adapter follows cursors until none remains.

use crate::inventory::{
    domain::{AgentId, ConnectorId, Group, RawConnector, RawHybridAgent, SchemaStatus},
    ports::{FetchError, FetchResult, PlatformFetcher},
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::{collections::HashSet, time::Duration};
use tracing::debug;

/// Connection settings for [`HttpPlatformFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFetcherSettings {
    /// API root, for example `https://api.fivetran.com/v1`.
    pub base_url: String,
    /// API key used as the basic-auth user name.
    pub api_key: String,
    /// API secret used as the basic-auth password.
    pub api_secret: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Page size requested from list endpoints.
    pub page_size: u32,
}

/// Platform fetcher backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpPlatformFetcher {
    http_client: Client,
    base_url: Url,
    api_key: String,
    api_secret: String,
    page_size: u32,
}

impl HttpPlatformFetcher {
    /// Creates a fetcher with its own pooled HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] when the HTTP client cannot be built,
    /// or [`FetchError::InvalidBaseUrl`] when the base URL does not parse.
    pub fn new(settings: HttpFetcherSettings) -> FetchResult<Self> {
        let http_client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(FetchError::network)?;
        Self::with_client(http_client, settings)
    }

    /// Creates a fetcher around an existing `reqwest::Client`.
    ///
    /// The client's own timeout applies; `settings.timeout` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidBaseUrl`] when the base URL does not
    /// parse or cannot carry a path.
    pub fn with_client(http_client: Client, settings: HttpFetcherSettings) -> FetchResult<Self> {
        let raw_url = settings.base_url.trim_end_matches('/');
        let base_url = Url::parse(raw_url).map_err(|err| FetchError::InvalidBaseUrl {
            url: raw_url.to_owned(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl {
                url: raw_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }
        Ok(Self {
            http_client,
            base_url,
            api_key: settings.api_key,
            api_secret: settings.api_secret,
            page_size: settings.page_size,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint_url(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> FetchResult<Value> {
        let endpoint = segments.join("/");
        let url = self.endpoint_url(segments)?;
        debug!(%url, ?query, "GET platform endpoint");

        let response = self
            .http_client
            .get(url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(FetchError::network)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%endpoint, status = status.as_u16(), "platform request failed");
            return Err(FetchError::from_status(
                status.as_u16(),
                &endpoint,
                error_message(&body),
            ));
        }

        let body: Value = response.json().await.map_err(|err| FetchError::Malformed {
            endpoint: endpoint.clone(),
            reason: err.to_string(),
        })?;
        body.get("data")
            .filter(|data| data.is_object())
            .cloned()
            .ok_or_else(|| FetchError::Malformed {
                endpoint,
                reason: "response has no data object".to_owned(),
            })
    }

    async fn get_all(&self, endpoint: &str) -> FetchResult<Vec<Value>> {
        let mut items = Vec::new();
        let mut seen_cursors = HashSet::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut query = vec![("limit", self.page_size.to_string())];
            if let Some(current) = &cursor {
                query.push(("cursor", current.clone()));
            }
            let data = self.get(&[endpoint], &query).await?;
            if let Some(page) = data.get("items").and_then(Value::as_array) {
                items.extend(page.iter().cloned());
            }
            match data.get("next_cursor").and_then(Value::as_str) {
                Some(next) if !next.is_empty() => {
                    if !seen_cursors.insert(next.to_owned()) {
                        return Err(FetchError::Malformed {
                            endpoint: endpoint.to_owned(),
                            reason: format!("pagination cursor '{next}' was returned twice"),
                        });
                    }
                    cursor = Some(next.to_owned());
                }
                _ => break,
            }
        }
        debug!(endpoint, count = items.len(), "fetched listing");
        Ok(items)
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_owned())
}

#[async_trait]
impl PlatformFetcher for HttpPlatformFetcher {
    async fn list_groups(&self) -> FetchResult<Vec<Group>> {
        let items = self.get_all("groups").await?;
        Ok(items.iter().map(Group::from_json).collect())
    }

    async fn list_connectors(&self) -> FetchResult<Vec<RawConnector>> {
        let items = self.get_all("connectors").await?;
        Ok(items.iter().map(RawConnector::from_json).collect())
    }

    async fn get_connector(&self, id: &ConnectorId) -> FetchResult<RawConnector> {
        let data = self.get(&["connectors", id.as_str()], &[]).await?;
        Ok(RawConnector::from_json(&data))
    }

    async fn get_connector_schemas(&self, id: &ConnectorId) -> FetchResult<SchemaStatus> {
        let segments = ["connectors", id.as_str(), "schemas"];
        let data = self.get(&segments, &[]).await?;
        Ok(SchemaStatus::from_json(&data))
    }

    async fn list_hybrid_agents(&self) -> FetchResult<Vec<RawHybridAgent>> {
        let items = self.get_all("local-processing-agents").await?;
        Ok(items.iter().map(RawHybridAgent::from_json).collect())
    }

    async fn get_hybrid_agent(&self, id: &AgentId) -> FetchResult<RawHybridAgent> {
        let data = self
            .get(&["local-processing-agents", id.as_str()], &[])
            .await?;
        Ok(RawHybridAgent::from_json(&data))
    }
}
