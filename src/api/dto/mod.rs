//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Timestamps are
//! rendered as RFC 3339 strings in UTC with millisecond precision.

pub mod health;
pub mod shorten;
pub mod stats;

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a timestamp as e.g. `2025-01-01T12:00:00.000Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_millis_utc() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2025-01-01T12:00:00.000Z");
    }
}
