//! Connector and hybrid agent diagnostics for the Fivetran platform.
//!
//! The module is read-only: it fetches platform state, normalizes it into
//! semantic health and connectivity states, filters by environment and
//! status, and diagnoses individual connectors. It follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
