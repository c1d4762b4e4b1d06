//! Connector Doctor: read-only diagnostics for Fivetran connectors and
//! hybrid deployment agents.
//!
//! The crate answers operator questions such as "which production
//! connectors are failing?" and "why is this connector broken?" by
//! fetching platform state, normalizing it into a small set of semantic
//! states, and synthesizing ranked issues with recommendations.
//!
//! # Architecture
//!
//! Connector Doctor follows hexagonal architecture principles:
//!
//! - **Domain**: Pure normalization, filtering, and diagnosis logic
//! - **Ports**: The read-only platform fetch contract
//! - **Adapters**: REST and in-memory fetchers
//!
//! # Modules
//!
//! - [`inventory`]: Fetching, normalization, filtering, and diagnosis
//! - [`tools`]: Tool envelopes, handlers, and the MCP server
//! - [`config`]: Validated runtime configuration
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod inventory;
pub mod logging;
pub mod tools;
