//! # Temporal Types — Campaign Timestamps
//!
//! Defines `Timestamp` and the lenient ISO-8601 parsing used for the
//! `last_updated` field of party rosters.
//!
//! Campaign files are hand-edited and come from several writer tools, so
//! the parser accepts the whole family of ISO-8601 shapes found in the
//! wild: date-only, naive date-times with `T` or space separators,
//! fractional seconds, explicit offsets, and `Z`. Naive inputs are
//! interpreted as UTC. Out-of-range components (month 13, hour 25) are
//! rejected, not clamped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TomeError;

/// Naive formats accepted by [`Timestamp::parse_lenient`], tried in order
/// after RFC 3339. Ordering matters: the seconds form must come before the
/// minutes form so `10:00:00` is not half-consumed.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A UTC timestamp attached to a campaign document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse a timestamp from any of the ISO-8601 shapes found in campaign
    /// files.
    ///
    /// Accepted inputs:
    ///
    /// - RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T12:00:00+02:00`) —
    ///   converted to UTC.
    /// - Naive date-times (`2024-05-01T10:00:00`, `2024-05-01 10:00`),
    ///   with or without fractional seconds — interpreted as UTC.
    /// - Date-only (`2024-05-01`) — midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns `TomeError::Timestamp` if no accepted shape matches, which
    /// includes calendar-invalid inputs such as `2024-13-01`.
    pub fn parse_lenient(s: &str) -> Result<Self, TomeError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(Utc.from_utc_datetime(&naive)));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))));
        }

        Err(TomeError::Timestamp(format!(
            "not a valid ISO-8601 timestamp: {s:?}"
        )))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO-8601 with Z suffix (e.g., `2024-05-01T10:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
