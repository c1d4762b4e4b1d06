//! Shared world state for connector diagnosis BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::FixedClock;
use connector_doctor::inventory::{
    adapters::memory::InMemoryPlatformFetcher, domain::DiagnosisPolicy,
    services::DiagnosticsService,
};
use rstest::fixture;
use serde_json::Value;

/// Service type used by the BDD world.
pub type TestDiagnosticsService = DiagnosticsService<InMemoryPlatformFetcher, FixedClock>;

/// Scenario world for connector diagnosis behaviour tests.
pub struct DoctorWorld {
    /// Fetcher shared with the service; steps seed it directly.
    pub fetcher: InMemoryPlatformFetcher,
    /// The diagnostics service under test.
    pub service: TestDiagnosticsService,
    /// Envelope returned by the last tool call.
    pub last_envelope: Option<Value>,
}

impl DoctorWorld {
    /// Creates a world with an empty platform.
    #[must_use]
    pub fn new() -> Self {
        let fetcher = InMemoryPlatformFetcher::new();
        let service = DiagnosticsService::new(
            Arc::new(fetcher.clone()),
            Arc::new(FixedClock),
            DiagnosisPolicy::default(),
        );
        Self {
            fetcher,
            service,
            last_envelope: None,
        }
    }

    /// Returns the last envelope or an error when no tool was called.
    pub fn envelope(&self) -> Result<&Value, eyre::Report> {
        self.last_envelope
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no tool has been called in this scenario"))
    }
}

impl Default for DoctorWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DoctorWorld {
    DoctorWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
