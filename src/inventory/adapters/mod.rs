//! Adapter implementations for the platform fetch port.

pub mod http;
pub mod memory;

pub use http::{HttpFetcherSettings, HttpPlatformFetcher};
pub use memory::{FetchOperation, InMemoryPlatformFetcher};
