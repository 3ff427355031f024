//! Timestamp parsing against `chrono` layouts.
//!
//! Layouts without an offset are read as UTC. Layouts without a time of day
//! resolve to midnight.

use chrono::format::ParseErrorKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::options::RFC3339;
use crate::error::ParseError;

/// Parse `raw` against `layout`, keeping the parsed offset.
///
/// The [`RFC3339`] layout accepts both `Z` and numeric offsets.
///
/// # Errors
///
/// Returns [`ParseError::Timestamp`] when `raw` does not match `layout`.
///
/// # Examples
///
/// ```
/// use envbind::parsers::{RFC3339, parse_timestamp};
///
/// let ts = parse_timestamp("2025-03-07T12:34:56Z", RFC3339).ok();
/// assert_eq!(ts.map(|t| t.timestamp()), Some(1_741_350_896));
/// let date = parse_timestamp("2025-03-07", "%Y-%m-%d").ok();
/// assert_eq!(date.map(|t| t.to_rfc3339()).as_deref(), Some("2025-03-07T00:00:00+00:00"));
/// ```
pub fn parse_timestamp(raw: &str, layout: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let failure = |source| ParseError::Timestamp {
        layout: layout.to_owned(),
        source,
    };
    if layout == RFC3339 {
        return DateTime::parse_from_rfc3339(raw).map_err(failure);
    }

    let with_offset = match DateTime::parse_from_str(raw, layout) {
        Ok(parsed) => return Ok(parsed),
        Err(err) => err,
    };
    let naive = match NaiveDateTime::parse_from_str(raw, layout) {
        Ok(parsed) => return Ok(parsed.and_utc().fixed_offset()),
        Err(err) => err,
    };
    match NaiveDate::parse_from_str(raw, layout) {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()),
        Err(date_only) => Err(failure(most_specific([with_offset, naive, date_only]))),
    }
}

/// Parse `raw` against `layout` and convert the result to UTC.
///
/// # Errors
///
/// Returns [`ParseError::Timestamp`] when `raw` does not match `layout`.
pub fn parse_utc_timestamp(raw: &str, layout: &str) -> Result<DateTime<Utc>, ParseError> {
    parse_timestamp(raw, layout).map(|parsed| parsed.with_timezone(&Utc))
}

/// Prefer an error describing malformed input over one reporting that the
/// layout carried too few fields for the attempted type.
fn most_specific(errors: [chrono::ParseError; 3]) -> chrono::ParseError {
    let [first, second, third] = errors;
    [first, second, third]
        .into_iter()
        .find(|err| err.kind() != ParseErrorKind::NotEnough)
        .unwrap_or(first)
}
