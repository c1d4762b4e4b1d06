//! Port contracts for platform inventory access.
//!
//! Ports define infrastructure-agnostic interfaces used by diagnostics
//! services.

pub mod fetcher;

pub use fetcher::{FetchError, FetchResult, PlatformFetcher};
