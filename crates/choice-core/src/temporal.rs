//! # Temporal Types — UTC Timestamps
//!
//! Defines [`Timestamp`], a UTC instant truncated to seconds, and the
//! calendar arithmetic used by credential time decay.
//!
//! ## Ingestion
//!
//! Credential producers emit ISO-8601 in several shapes
//! (`2024-03-01T10:00:00.000Z`, `2024-03-01T10:00+0200`, the basic
//! `20240301T100000Z`, a bare `2024-03-01` or `2024-03`).
//! [`Timestamp::parse_lenient()`] accepts all of them and normalizes to UTC.
//! Deserialization goes through the lenient parser, so a malformed date is
//! rejected at the ingestion boundary and never reaches scoring.
//!
//! A [`Timestamp`] always serializes as `YYYY-MM-DDTHH:MM:SSZ`. Dates that
//! belong to an attested document use [`IsoTimestamp`], which writes back
//! the producer's text unchanged.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A UTC timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — strict RFC 3339 with `Z` suffix.
/// - [`Timestamp::parse_lenient()`] — any ISO-8601 instant or date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a strict RFC 3339 timestamp with a `Z` suffix.
    ///
    /// Explicit offsets, even `+00:00`, are rejected.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(invalid(s, "timestamp must use Z suffix (UTC only)"));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| invalid(s, &e.to_string()))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse any ISO-8601 instant or calendar date, converting to UTC.
    ///
    /// Accepted shapes, tried in order:
    ///
    /// 1. RFC 3339 with `Z` or a numeric offset.
    /// 2. Extended or basic date-time with minute or second precision and
    ///    `Z`, `±HH`, `±HHMM` or `±HH:MM`.
    /// 3. The same date-times without a zone, assumed UTC.
    /// 4. Calendar date (`YYYY-MM-DD`, `YYYYMMDD`), midnight UTC.
    /// 5. Reduced precision (`YYYY-MM`, `YYYY`), the first instant of the
    ///    month or year.
    pub fn parse_lenient(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))));
        }
        for format in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
                return Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(truncate_to_seconds(naive.and_utc())));
            }
        }
        let date = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .or_else(|| reduced_precision_date(trimmed))
            .ok_or_else(|| invalid(s, "not an ISO-8601 instant or date"))?;
        date.and_hms_opt(0, 0, 0)
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| invalid(s, "date has no midnight"))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, ValidationError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| invalid(&secs.to_string(), "out of range for a Unix timestamp"))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the Unix epoch timestamp in milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Render as ISO-8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Whole calendar years from `self` until `later`. See [`whole_years_between`].
    pub fn whole_years_until(&self, later: &Timestamp) -> i64 {
        whole_years_between(&self.0, &later.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_lenient(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Producer-written dates
// ---------------------------------------------------------------------------

/// An ISO-8601 date as written by its producer, paired with its instant.
///
/// Serializes as the original text, so a document that carries one can be
/// stored and reloaded without changing a byte of it. Equality compares the
/// text as well as the instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsoTimestamp {
    raw: String,
    instant: Timestamp,
}

impl IsoTimestamp {
    /// Parse `raw` with [`Timestamp::parse_lenient()`] and keep the text.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let instant = Timestamp::parse_lenient(&raw)?;
        Ok(Self { raw, instant })
    }

    /// The parsed UTC instant.
    pub fn instant(&self) -> &Timestamp {
        &self.instant
    }

    /// The text exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<Timestamp> for IsoTimestamp {
    fn from(instant: Timestamp) -> Self {
        Self {
            raw: instant.to_iso8601(),
            instant,
        }
    }
}

impl std::fmt::Display for IsoTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for IsoTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for IsoTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// Number of whole calendar years elapsed from `from` to `to`.
///
/// A year counts only once its anniversary (month, day, and time of day) has
/// been reached, so the result is floored, never rounded. Negative when `to`
/// precedes `from`.
pub fn whole_years_between(from: &DateTime<Utc>, to: &DateTime<Utc>) -> i64 {
    if to < from {
        return -whole_years_between(to, from);
    }
    let mut years = i64::from(to.year() - from.year());
    let anniversary_reached =
        (to.month(), to.day(), to.time()) >= (from.month(), from.day(), from.time());
    if !anniversary_reached {
        years -= 1;
    }
    years
}

// ---------------------------------------------------------------------------
// ISO-8601 shapes
// ---------------------------------------------------------------------------

/// Date-times carrying a zone. `%#z` takes `Z`, `±HH`, `±HHMM` and `±HH:MM`.
const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
    "%Y%m%dT%H%M%#z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// `YYYY-MM` or `YYYY`, resolved to the first day of the period.
fn reduced_precision_date(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('-') {
        Some((year, month)) if year.len() == 4 && month.len() == 2 => {
            if !all_digits(year) || !all_digits(month) {
                return None;
            }
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        None if s.len() == 4 && all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

fn invalid(value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidTimestamp {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
