//! Validity period handling: minutes from creation until a link stops resolving.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::error::AppError;

/// Validity applied when the caller does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: f64 = 30.0;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Converts a validity in minutes into a duration.
///
/// Fractional minutes are allowed and rounded up to the next millisecond, so
/// any positive validity yields a non-zero duration.
///
/// # Errors
///
/// Returns [`AppError::InvalidValidity`] with `details.reason`:
/// - `"not_a_number"` for NaN
/// - `"non_positive"` for zero or negative values
/// - `"out_of_range"` for infinite or unrepresentable values
pub fn validity_duration(minutes: f64) -> Result<Duration, AppError> {
    if minutes.is_nan() {
        return Err(AppError::invalid_validity(
            "The validity you have entered is not a number",
            json!({ "reason": "not_a_number" }),
        ));
    }

    if minutes <= 0.0 {
        return Err(AppError::invalid_validity(
            "The validity you have entered must be greater than zero",
            json!({ "reason": "non_positive", "validity": minutes }),
        ));
    }

    let millis = (minutes * MILLIS_PER_MINUTE).ceil();
    if !millis.is_finite() || millis >= i64::MAX as f64 {
        return Err(out_of_range(minutes));
    }

    Duration::try_milliseconds(millis as i64).ok_or_else(|| out_of_range(minutes))
}

/// Computes `created_at + minutes`, rejecting invalid or overflowing validities.
///
/// # Errors
///
/// See [`validity_duration`]; an expiry past the representable range is
/// reported as `"out_of_range"`.
pub fn expiry_from(created_at: DateTime<Utc>, minutes: f64) -> Result<DateTime<Utc>, AppError> {
    let validity = validity_duration(minutes)?;

    created_at
        .checked_add_signed(validity)
        .ok_or_else(|| out_of_range(minutes))
}

fn out_of_range(minutes: f64) -> AppError {
    AppError::invalid_validity(
        "The validity you have entered is too large",
        json!({ "reason": "out_of_range", "validity": minutes.to_string() }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: AppError) -> String {
        assert!(matches!(err, AppError::InvalidValidity { .. }));
        err.details()["reason"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_whole_minutes() {
        assert_eq!(validity_duration(1.0).unwrap(), Duration::minutes(1));
        assert_eq!(validity_duration(30.0).unwrap(), Duration::minutes(30));
    }

    #[test]
    fn test_fractional_minutes() {
        assert_eq!(validity_duration(0.5).unwrap(), Duration::seconds(30));
    }

    #[test]
    fn test_tiny_validity_rounds_up() {
        assert_eq!(validity_duration(1e-9).unwrap(), Duration::milliseconds(1));
    }

    #[test]
    fn test_nan_is_not_a_number() {
        assert_eq!(reason(validity_duration(f64::NAN).unwrap_err()), "not_a_number");
    }

    #[test]
    fn test_zero_and_negative_are_non_positive() {
        assert_eq!(reason(validity_duration(0.0).unwrap_err()), "non_positive");
        assert_eq!(reason(validity_duration(-5.0).unwrap_err()), "non_positive");
        assert_eq!(
            reason(validity_duration(f64::NEG_INFINITY).unwrap_err()),
            "non_positive"
        );
    }

    #[test]
    fn test_infinite_is_out_of_range() {
        assert_eq!(
            reason(validity_duration(f64::INFINITY).unwrap_err()),
            "out_of_range"
        );
    }

    #[test]
    fn test_huge_is_out_of_range() {
        assert_eq!(reason(validity_duration(1e300).unwrap_err()), "out_of_range");
    }

    #[test]
    fn test_expiry_from() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, 1.0).unwrap(), now + Duration::minutes(1));
    }

    #[test]
    fn test_expiry_overflow() {
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::minutes(1);
        assert_eq!(
            reason(expiry_from(near_end, 10.0).unwrap_err()),
            "out_of_range"
        );
    }
}
