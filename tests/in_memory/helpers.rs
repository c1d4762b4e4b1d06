//! Shared fixtures for tool handler tests.

use crate::test_helpers::{FixedClock, seed_connector, seed_environment_groups};
use connector_doctor::inventory::{
    adapters::memory::InMemoryPlatformFetcher, domain::DiagnosisPolicy,
    services::DiagnosticsService,
};
use rstest::fixture;
use serde_json::json;
use std::sync::Arc;

/// Service type used by the handler tests.
pub type TestService = DiagnosticsService<InMemoryPlatformFetcher, FixedClock>;

/// Provides a fetcher seeded with three environments of connectors.
#[fixture]
pub fn fetcher() -> InMemoryPlatformFetcher {
    let fetcher = InMemoryPlatformFetcher::new();
    let seeded = seed_environment_groups(&fetcher)
        .and_then(|()| {
            seed_connector(
                &fetcher,
                "prod_pg",
                "g_prod",
                false,
                json!({"setup_state": "connected", "sync_state": "failed"}),
            )
        })
        .and_then(|()| {
            seed_connector(
                &fetcher,
                "prod_sf",
                "g_prod",
                false,
                json!({"setup_state": "connected", "sync_state": "scheduled"}),
            )
        })
        .and_then(|()| {
            seed_connector(
                &fetcher,
                "pre_pg",
                "g_pre",
                false,
                json!({"setup_state": "broken", "sync_state": "scheduled"}),
            )
        })
        .and_then(|()| {
            seed_connector(
                &fetcher,
                "dev_pg",
                "g_dev",
                true,
                json!({"setup_state": "connected", "sync_state": "paused"}),
            )
        });
    assert!(seeded.is_ok(), "fixture seeding failed: {seeded:?}");
    fetcher
}

/// Wraps a fetcher in a diagnostics service with a fixed clock.
pub fn service_over(fetcher: InMemoryPlatformFetcher) -> TestService {
    DiagnosticsService::new(
        Arc::new(fetcher),
        Arc::new(FixedClock),
        DiagnosisPolicy::default(),
    )
}

/// Provides a service over the seeded fetcher.
#[fixture]
pub fn service(fetcher: InMemoryPlatformFetcher) -> TestService {
    service_over(fetcher)
}
