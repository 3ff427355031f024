//! Byte decoders for `Vec<u8>` targets.
//!
//! Any `Fn(&str) -> Result<Vec<u8>, BoxError>` works as a decoder; these
//! cover the common encodings.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

use crate::error::BoxError;

/// Decode standard base64 with padding. This is the default decoder.
///
/// # Errors
///
/// Returns the `base64` error for invalid symbols, length or padding.
///
/// # Examples
///
/// ```
/// use envbind::parsers::decoders;
/// assert_eq!(decoders::base64_standard("AQID").ok(), Some(vec![1, 2, 3]));
/// ```
pub fn base64_standard(raw: &str) -> Result<Vec<u8>, BoxError> {
    Ok(STANDARD.decode(raw)?)
}

/// Decode URL-safe base64 with padding.
///
/// # Errors
///
/// Returns the `base64` error for invalid symbols, length or padding.
pub fn base64_url_safe(raw: &str) -> Result<Vec<u8>, BoxError> {
    Ok(URL_SAFE.decode(raw)?)
}

/// Decode hexadecimal, accepting either case.
///
/// # Errors
///
/// Returns the `hex` error for odd lengths or non-hex characters.
///
/// # Examples
///
/// ```
/// use envbind::parsers::decoders;
/// assert_eq!(decoders::hex("010203").ok(), Some(vec![1, 2, 3]));
/// ```
pub fn hex(raw: &str) -> Result<Vec<u8>, BoxError> {
    Ok(::hex::decode(raw)?)
}

/// Use the raw UTF-8 bytes unchanged.
///
/// # Errors
///
/// Never returns an error.
pub fn raw_utf8(raw: &str) -> Result<Vec<u8>, BoxError> {
    Ok(raw.as_bytes().to_vec())
}
