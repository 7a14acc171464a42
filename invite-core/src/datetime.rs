//! Timestamp parsing for invite start/end times.
//!
//! Inputs without an offset are treated as UTC; inputs carrying an offset are
//! converted to UTC. There is no other timezone handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{InviteError, InviteResult};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 date-time, RFC 3339 timestamp or bare date into a UTC instant.
pub fn parse_timestamp(input: &str) -> InviteResult<DateTime<Utc>> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(InviteError::Parse {
        input: input.to_string(),
        reason: "expected YYYY-MM-DDTHH:MM:SS, an RFC 3339 timestamp or YYYY-MM-DD".to_string(),
    })
}
