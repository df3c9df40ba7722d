//! Timestamps for cached-state bookkeeping.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a cached snapshot is refreshed.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Milliseconds elapsed since `earlier`, clamped at zero.
#[must_use]
pub fn millis_since(earlier: Timestamp) -> u64 {
    u64::try_from((now() - earlier).num_milliseconds()).unwrap_or(0)
}
