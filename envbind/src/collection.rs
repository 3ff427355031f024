//! Adapters lifting a scalar parser to sequences and optional values.
//!
//! Sequence parsing is all-or-nothing: when any element fails, the whole
//! value fails and the target keeps what it held before.

use std::sync::Arc;

use crate::error::ParseError;

/// Shared string-to-value parser.
pub type Parser<T> = Arc<dyn Fn(&str) -> Result<T, ParseError> + Send + Sync>;

/// Position of a value among the occurrences of one source.
///
/// The first occurrence of a flag replaces whatever the default or the
/// environment stored. Later occurrences extend sequences and overwrite
/// scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occurrence {
    /// First value seen from this source.
    First,
    /// Any subsequent value from the same source.
    Repeat,
}

/// Split `raw` on `separator` and parse every element in order.
///
/// An empty input yields an empty sequence and an empty separator treats
/// the whole input as a single element.
///
/// # Errors
///
/// Returns the error of the first element that fails to parse.
///
/// # Examples
///
/// ```
/// use envbind::collection::parse_sequence;
/// use envbind::parsers::parse_int;
///
/// let ids = parse_sequence("1,3,4", ",", parse_int::<i64>);
/// assert_eq!(ids.ok(), Some(vec![1, 3, 4]));
/// assert!(parse_sequence("one,two", ",", parse_int::<i64>).is_err());
/// ```
pub fn parse_sequence<T, F>(raw: &str, separator: &str, parse: F) -> Result<Vec<T>, ParseError>
where
    F: Fn(&str) -> Result<T, ParseError>,
{
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    if separator.is_empty() {
        return parse(raw).map(|value| vec![value]);
    }
    raw.split(separator).map(parse).collect()
}

/// Wrap an element parser so it parses separated sequences.
#[must_use]
pub fn sequence<T>(element: Parser<T>, separator: impl Into<String>) -> Parser<Vec<T>>
where
    T: 'static,
{
    let separator = separator.into();
    Arc::new(move |raw: &str| parse_sequence(raw, &separator, |part| element(part)))
}

/// Wrap a parser so successful values are stored as `Some`.
#[must_use]
pub fn optional<T>(inner: Parser<T>) -> Parser<Option<T>>
where
    T: 'static,
{
    Arc::new(move |raw: &str| inner(raw).map(Some))
}

/// Fold a parsed sequence into `current` according to `occurrence`.
pub fn extend_sequence<T>(current: &mut Vec<T>, parsed: Vec<T>, occurrence: Occurrence) {
    match occurrence {
        Occurrence::First => *current = parsed,
        Occurrence::Repeat => current.extend(parsed),
    }
}
