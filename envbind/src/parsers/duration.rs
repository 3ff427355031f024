//! Duration literals such as `300ms`, `1.5h` or `2h45m`.
//!
//! A literal is an optional sign followed by one or more components, each a
//! decimal number with an optional fraction and a unit suffix. Valid units
//! are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` needs no
//! unit.

use std::time::Duration;

use thiserror::Error;

/// Maximum number of fractional digits that contribute to the result.
const MAX_FRACTION_DIGITS: usize = 18;

/// Reasons a duration literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DurationError {
    /// The literal was empty or only a sign.
    #[error("empty duration")]
    Empty,

    /// A component did not start with a number.
    #[error("expected a number at {0:?}")]
    InvalidNumber(String),

    /// A number was not followed by a unit.
    #[error("missing unit after {0:?}")]
    MissingUnit(String),

    /// The unit suffix is not recognised.
    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    /// Negative durations cannot be represented.
    #[error("negative durations are not supported")]
    Negative,

    /// The total does not fit in 64 bits of nanoseconds.
    #[error("duration out of range")]
    Overflow,
}

/// Parse a duration literal.
///
/// # Errors
///
/// Returns a [`DurationError`] describing the first malformed component.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use envbind::parsers::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").ok(), Some(Duration::from_secs(5400)));
/// assert_eq!(parse_duration("1.5s").ok(), Some(Duration::from_millis(1500)));
/// assert!(parse_duration("5").is_err());
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration, DurationError> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (nanos, tail) = next_component(rest)?;
        total = total.checked_add(nanos).ok_or(DurationError::Overflow)?;
        rest = tail;
    }

    if negative && total > 0 {
        return Err(DurationError::Negative);
    }
    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow)?;
    Ok(Duration::from_nanos(nanos))
}

/// Consume one `<number><unit>` component, returning its nanoseconds and
/// the unparsed tail.
fn next_component(input: &str) -> Result<(u128, &str), DurationError> {
    let (whole, after_whole) = take_digits(input);
    let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
        Some(tail) => {
            let (digits, remainder) = take_digits(tail);
            (Some(digits), remainder)
        }
        None => (None, after_whole),
    };
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(DurationError::InvalidNumber(input.to_owned()));
    }

    let unit_len = after_fraction
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(after_fraction.len());
    let (unit, tail) = after_fraction.split_at(unit_len);
    if unit.is_empty() {
        return Err(DurationError::MissingUnit(input.to_owned()));
    }
    let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_owned()))?;

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| DurationError::Overflow)?
    };
    let mut nanos = whole_value
        .checked_mul(scale)
        .ok_or(DurationError::Overflow)?;
    if let Some(digits) = fraction {
        nanos = nanos
            .checked_add(fraction_nanos(digits, scale))
            .ok_or(DurationError::Overflow)?;
    }
    Ok((nanos, tail))
}

fn take_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}

/// Scale `0.<digits>` by `scale`, truncating towards zero.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let (numerator, denominator) = digits
        .bytes()
        .take(MAX_FRACTION_DIGITS)
        .fold((0_u128, 1_u128), |(num, den), digit| {
            (num * 10 + u128::from(digit - b'0'), den * 10)
        });
    numerator * scale / denominator
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60_000_000_000),
        "h" => Some(3_600_000_000_000),
        _ => None,
    }
}
