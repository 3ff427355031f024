//! Binder-wide defaults for new bindings.

use crate::error::BoxError;
use crate::parsers::ParseOptions;

/// Defaults copied into every binding created by a [`Binder`](crate::Binder).
///
/// Per-binding chain methods override these values.
///
/// # Examples
///
/// ```
/// use envbind::{Settings, parsers::decoders};
///
/// let settings = Settings::new()
///     .with_slice_separator(";")
///     .with_string_decoder(decoders::hex)
///     .with_empty_env_as_unset(true);
/// assert_eq!(settings.parse_options().separator(), ";");
/// assert!(settings.empty_env_is_unset());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Settings {
    options: ParseOptions,
    empty_env_is_unset: bool,
}

impl Settings {
    /// `,` separator, standard base64, RFC 3339 and empty values present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default separator for sequence targets.
    #[must_use]
    pub fn with_slice_separator(mut self, separator: impl Into<String>) -> Self {
        self.options = self.options.with_separator(separator);
        self
    }

    /// Default decoder for byte string targets.
    #[must_use]
    pub fn with_string_decoder<F>(mut self, decoder: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
    {
        self.options = self.options.with_decoder(decoder);
        self
    }

    /// Default layout for timestamp targets.
    #[must_use]
    pub fn with_time_layout(mut self, layout: impl Into<String>) -> Self {
        self.options = self.options.with_time_layout(layout);
        self
    }

    /// Treat environment variables set to the empty string as unset.
    #[must_use]
    pub fn with_empty_env_as_unset(mut self, enabled: bool) -> Self {
        self.empty_env_is_unset = enabled;
        self
    }

    /// Parser options new bindings start from.
    #[must_use]
    pub const fn parse_options(&self) -> &ParseOptions {
        &self.options
    }

    /// Whether an empty environment value counts as absent.
    #[must_use]
    pub const fn empty_env_is_unset(&self) -> bool {
        self.empty_env_is_unset
    }
}
