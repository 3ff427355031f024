//! Pure string-to-value parsers for the builtin scalar types.
//!
//! Every parser is stateless and performs no I/O. Type-specific knobs (byte
//! decoder, timestamp layout, slice separator) travel in [`ParseOptions`].

pub mod decoders;
mod duration;
mod options;
mod time;

use std::net::AddrParseError;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use url::Url;

use crate::error::ParseError;

pub use duration::{DurationError, parse_duration};
pub use options::{ParseOptions, RFC3339, StringDecoder};
pub use time::{parse_timestamp, parse_utc_timestamp};

/// Identity parser; never fails.
///
/// # Errors
///
/// Never returns an error.
pub fn parse_string(raw: &str) -> Result<String, ParseError> {
    Ok(raw.to_owned())
}

/// Base-10 integer parser for any primitive integer width.
///
/// # Errors
///
/// Returns [`ParseError::Int`] for non-numeric or out-of-range input.
pub fn parse_int<T>(raw: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = ParseIntError>,
{
    Ok(raw.parse()?)
}

/// Base-10 decimal parser for `f32` and `f64`.
///
/// # Errors
///
/// Returns [`ParseError::Float`] for malformed input.
pub fn parse_float<T>(raw: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = ParseFloatError>,
{
    Ok(raw.parse()?)
}

/// Boolean parser accepting `1`/`0`, `t`/`f` and `true`/`false` in any case.
///
/// # Errors
///
/// Returns [`ParseError::Bool`] for any other token.
pub fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    const TRUTHY: [&str; 3] = ["1", "t", "true"];
    const FALSY: [&str; 3] = ["0", "f", "false"];
    if TRUTHY.iter().any(|token| raw.eq_ignore_ascii_case(token)) {
        Ok(true)
    } else if FALSY.iter().any(|token| raw.eq_ignore_ascii_case(token)) {
        Ok(false)
    } else {
        Err(ParseError::Bool(raw.to_owned()))
    }
}

/// Decode a byte string with `decoder`.
///
/// # Errors
///
/// Returns [`ParseError::Bytes`] when the decoder rejects the input.
pub fn parse_bytes(raw: &str, decoder: &StringDecoder) -> Result<Vec<u8>, ParseError> {
    decoder(raw).map_err(ParseError::Bytes)
}

/// Parse an absolute URL into its structured form.
///
/// There is no base to resolve against, so relative references such as
/// `/home` are rejected.
///
/// # Errors
///
/// Returns [`ParseError::Url`] for syntactically invalid or relative URLs.
pub fn parse_url(raw: &str) -> Result<Url, ParseError> {
    Ok(Url::parse(raw)?)
}

/// Parse dotted-quad or colon-hex notation into `IpAddr`, `Ipv4Addr` or
/// `Ipv6Addr`.
///
/// # Errors
///
/// Returns [`ParseError::Ip`] when the input is not an address of type `T`.
pub fn parse_ip<T>(raw: &str) -> Result<T, ParseError>
where
    T: FromStr<Err = AddrParseError>,
{
    Ok(raw.parse()?)
}
