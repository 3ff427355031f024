//! Primary error enums for binding registration and value parsing.

use std::net::AddrParseError;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::parsers::DurationError;

/// Boxed error accepted from user-supplied parsers and decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used by fallible binder operations.
pub type BindResult<T> = Result<T, BindError>;

/// Errors raised while declaring bindings or parsing the command line.
///
/// Parse failures of individual values never surface here; they are routed
/// to the binder's [`ErrorPolicy`](crate::ErrorPolicy) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A flag with the same name was already registered.
    #[error("flag redefined: {name}")]
    DuplicateFlag {
        /// Name of the clashing flag.
        name: String,
    },

    /// Another binding already reads this environment variable.
    #[error("environment variable bound twice: {name}")]
    DuplicateEnv {
        /// Name of the clashing environment variable.
        name: String,
    },

    /// The flag name cannot be expressed as a long command-line option.
    #[error("invalid flag name {name:?}: {reason}")]
    InvalidFlagName {
        /// Offending flag name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// No flag with this name was registered.
    #[error("no such flag: {name}")]
    UnknownFlag {
        /// Name that failed to resolve.
        name: String,
    },

    /// A flag was bound after the command line had been parsed.
    #[error("flag {name} bound after the command line was parsed")]
    BoundAfterParse {
        /// Name of the late flag.
        name: String,
    },

    /// The command line was parsed more than once.
    #[error("command-line flags were already parsed")]
    AlreadyParsed,

    /// The command line did not match the registered flags.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),
}

impl From<clap::Error> for BindError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}

/// Reasons a raw string failed to convert into a target value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Malformed or out-of-range integer.
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    /// Malformed floating-point number.
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// Token that is neither truthy nor falsy.
    #[error("invalid boolean {0:?}")]
    Bool(String),

    /// Byte string rejected by the configured decoder.
    #[error("invalid byte string: {0}")]
    Bytes(#[source] BoxError),

    /// Malformed duration literal.
    #[error("invalid duration: {0}")]
    Duration(#[from] DurationError),

    /// Timestamp that does not match the configured layout.
    #[error("invalid timestamp for layout {layout:?}: {source}")]
    Timestamp {
        /// Layout the input was matched against.
        layout: String,
        /// Underlying `chrono` failure.
        #[source]
        source: chrono::ParseError,
    },

    /// Syntactically invalid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Input that parses to no valid IP address.
    #[error("invalid IP address")]
    Ip(#[from] AddrParseError),

    /// Environment value that is not valid unicode.
    #[error("value is not valid unicode")]
    NotUnicode,

    /// JSON document that does not decode into the target type.
    #[cfg(feature = "serde_json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a user-supplied parser.
    #[error("{0}")]
    Custom(#[source] BoxError),
}

impl ParseError {
    /// Wrap an arbitrary error returned by a custom parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::ParseError;
    /// let err = ParseError::custom("unknown colour");
    /// assert_eq!(err.to_string(), "unknown colour");
    /// ```
    #[must_use]
    pub fn custom(err: impl Into<BoxError>) -> Self {
        Self::Custom(err.into())
    }
}
