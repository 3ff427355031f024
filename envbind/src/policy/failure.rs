//! Context describing a single failed parse.

use std::error::Error;
use std::fmt;

use crate::error::ParseError;

/// Source that supplied a value to a binding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Source {
    /// Default stored when the binding was finalised.
    Default,
    /// Value read from an environment variable.
    Environment,
    /// Value supplied on the command line.
    Flag,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Environment => "env-variable",
            Self::Flag => "flag",
        })
    }
}

/// A raw value that could not be converted for its binding.
///
/// Rendered as `unable to parse env-variable "PORT" as type u16` or
/// `unable to parse flag "port" as type u16`; the underlying
/// [`ParseError`] is available through [`std::error::Error::source`].
#[derive(Debug)]
pub struct ParseFailure {
    origin: Source,
    raw: String,
    type_name: String,
    env_name: Option<String>,
    flag_name: Option<String>,
    error: ParseError,
}

impl ParseFailure {
    pub(crate) fn new(
        origin: Source,
        raw: impl Into<String>,
        type_name: impl Into<String>,
        env_name: Option<&str>,
        flag_name: Option<&str>,
        error: ParseError,
    ) -> Self {
        Self {
            origin,
            raw: raw.into(),
            type_name: type_name.into(),
            env_name: env_name.map(str::to_owned),
            flag_name: flag_name.map(str::to_owned),
            error,
        }
    }

    /// Source whose value failed to parse.
    #[must_use]
    pub const fn origin(&self) -> Source {
        self.origin
    }

    /// Name of the variable or flag that produced the value.
    #[must_use]
    pub fn name(&self) -> &str {
        let name = match self.origin {
            Source::Environment => self.env_name.as_deref(),
            Source::Flag => self.flag_name.as_deref(),
            Source::Default => None,
        };
        name.unwrap_or_default()
    }

    /// Offending raw string.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Rendered name of the target type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Environment variable bound to the target, if any.
    #[must_use]
    pub fn env_name(&self) -> Option<&str> {
        self.env_name.as_deref()
    }

    /// Flag bound to the target, if any.
    #[must_use]
    pub fn flag_name(&self) -> Option<&str> {
        self.flag_name.as_deref()
    }

    /// Underlying parser error.
    #[must_use]
    pub const fn error(&self) -> &ParseError {
        &self.error
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to parse {} {:?} as type {}",
            self.origin,
            self.name(),
            self.type_name
        )
    }
}

impl Error for ParseFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
