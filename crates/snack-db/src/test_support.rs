//! Shared test utilities for snack-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::SnackDb;

    /// Fresh in-memory database with migrations applied.
    pub async fn test_db() -> SnackDb {
        SnackDb::open_local(":memory:").await.unwrap()
    }

    /// A fixed instant `minutes` after 2025-01-01T00:00Z, for deterministic ordering.
    pub fn at_minute(minutes: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(i64::from(minutes))
    }
}
