use crate::prelude::{SignalError, SignalResult};
use chrono::{DateTime, Duration, Utc};

/// Parses an RFC 3339 timestamp into a UTC instant.
pub fn parse_instant(text: &str) -> SignalResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| SignalError::InvalidInput(format!("malformed instant {:?}: {}", text, err)))
}

/// Converts fractional Unix seconds into an instant with millisecond precision.
pub fn instant_from_unix_seconds(seconds: f64) -> SignalResult<DateTime<Utc>> {
    let millis = seconds_to_millis(seconds)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        SignalError::InvalidInput(format!("unix time {} is out of range", seconds))
    })
}

/// Shifts `instant` forward by a non-negative number of seconds.
pub(crate) fn advance_by_seconds(
    instant: DateTime<Utc>,
    seconds: f64,
) -> SignalResult<DateTime<Utc>> {
    if seconds.is_sign_negative() && seconds != 0.0 {
        return Err(SignalError::InvalidInput(format!(
            "duration must be non-negative, got {}",
            seconds
        )));
    }
    let millis = seconds_to_millis(seconds)?;
    Duration::try_milliseconds(millis)
        .and_then(|offset| instant.checked_add_signed(offset))
        .ok_or_else(|| {
            SignalError::InvalidInput(format!(
                "{} + {} s is out of range",
                instant.to_rfc3339(),
                seconds
            ))
        })
}

fn seconds_to_millis(seconds: f64) -> SignalResult<i64> {
    if !seconds.is_finite() {
        return Err(SignalError::InvalidInput(format!(
            "expected a finite number of seconds, got {}",
            seconds
        )));
    }
    let millis = (seconds * 1000.0).round();
    if millis < i64::MIN as f64 || millis >= i64::MAX as f64 {
        return Err(SignalError::InvalidInput(format!(
            "{} s cannot be represented",
            seconds
        )));
    }
    Ok(millis as i64)
}
