//! Unit tests for inventory normalization, filtering, diagnosis, and
//! services.


use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2024-01-15T12:00:00Z.
    pub(crate) fn reference() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
                .single()
                .expect("valid reference instant"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
