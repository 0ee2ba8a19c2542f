//! Timestamp helpers shared by services.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with millisecond precision and `Z` suffix.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC time as epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
