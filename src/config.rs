//! Runtime configuration for the diagnostics server.

use crate::inventory::{adapters::HttpFetcherSettings, domain::DiagnosisPolicy};
use std::time::Duration;
use thiserror::Error;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.fivetran.com/v1";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size the platform accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Errors returned while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required credential was missing or blank.
    #[error("{name} must be set")]
    MissingCredential {
        /// Environment variable that supplies the credential.
        name: &'static str,
    },

    /// The base URL is not an http(s) URL.
    #[error("invalid base URL '{0}': expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// A numeric setting is out of range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Setting name.
        name: &'static str,
        /// Supplied value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },
}

/// Validated server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorConfig {
    api_key: String,
    api_secret: String,
    base_url: String,
    timeout: Duration,
    page_size: u32,
    policy: DiagnosisPolicy,
}

/// Unvalidated configuration inputs, as read from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorConfigInput {
    /// API key.
    pub api_key: Option<String>,
    /// API secret.
    pub api_secret: Option<String>,
    /// API root.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Page size for list endpoints.
    pub page_size: u32,
    /// Staleness window in hours.
    pub stale_sync_hours: u32,
    /// Recent-failure window in hours.
    pub recent_failure_hours: u32,
}

impl Default for DoctorConfigInput {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            stale_sync_hours: DiagnosisPolicy::DEFAULT_STALE_SYNC_HOURS,
            recent_failure_hours: DiagnosisPolicy::DEFAULT_RECENT_FAILURE_HOURS,
        }
    }
}

impl DoctorConfig {
    /// Validates configuration inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a credential is blank, the base URL is
    /// not http(s), or a numeric setting is out of range.
    pub fn from_input(input: DoctorConfigInput) -> Result<Self, ConfigError> {
        let api_key = required(input.api_key, "FIVETRAN_API_KEY")?;
        let api_secret = required(input.api_secret, "FIVETRAN_API_SECRET")?;

        let base_url = input.base_url.trim().trim_end_matches('/').to_owned();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(input.base_url));
        }

        in_range("timeout_secs", input.timeout_secs, 1, 600)?;
        in_range(
            "page_size",
            u64::from(input.page_size),
            1,
            u64::from(MAX_PAGE_SIZE),
        )?;
        in_range(
            "stale_sync_hours",
            u64::from(input.stale_sync_hours),
            1,
            8760,
        )?;
        in_range(
            "recent_failure_hours",
            u64::from(input.recent_failure_hours),
            1,
            8760,
        )?;

        Ok(Self {
            api_key,
            api_secret,
            base_url,
            timeout: Duration::from_secs(input.timeout_secs),
            page_size: input.page_size,
            policy: DiagnosisPolicy::from_hours(
                input.stale_sync_hours,
                input.recent_failure_hours,
            ),
        })
    }

    /// Returns the API root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the diagnosis policy.
    #[must_use]
    pub const fn policy(&self) -> DiagnosisPolicy {
        self.policy
    }

    /// Builds HTTP fetcher settings.
    #[must_use]
    pub fn fetcher_settings(&self) -> HttpFetcherSettings {
        HttpFetcherSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            timeout: self.timeout,
            page_size: self.page_size,
        }
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(ConfigError::MissingCredential { name })
}

const fn in_range(name: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
