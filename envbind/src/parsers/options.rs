//! Type-specific parsing knobs shared by a binding's parsers.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;

use super::decoders;

/// Layout selecting RFC 3339 timestamps, e.g. `2025-03-07T12:34:56Z`.
///
/// Other layouts use `chrono` strftime syntax such as `%Y-%m-%d`.
pub const RFC3339: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Function turning a raw string into bytes for `Vec<u8>` targets.
pub type StringDecoder = Arc<dyn Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync>;

/// Separator, byte decoder and timestamp layout applied by the builtin
/// parsers.
#[derive(Clone)]
pub struct ParseOptions {
    separator: String,
    decoder: StringDecoder,
    time_layout: String,
}

impl ParseOptions {
    /// Options with `,` as separator, standard base64 and RFC 3339.
    #[must_use]
    pub fn new() -> Self {
        Self {
            separator: ",".to_owned(),
            decoder: Arc::new(decoders::base64_standard),
            time_layout: RFC3339.to_owned(),
        }
    }

    /// Replace the sequence separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replace the byte decoder.
    #[must_use]
    pub fn with_decoder<F>(mut self, decoder: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
    {
        self.decoder = Arc::new(decoder);
        self
    }

    /// Replace the timestamp layout.
    #[must_use]
    pub fn with_time_layout(mut self, layout: impl Into<String>) -> Self {
        self.time_layout = layout.into();
        self
    }

    /// Separator splitting sequence values.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Decoder used for byte strings.
    #[must_use]
    pub const fn decoder(&self) -> &StringDecoder {
        &self.decoder
    }

    /// Layout used for timestamps.
    #[must_use]
    pub fn time_layout(&self) -> &str {
        &self.time_layout
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("separator", &self.separator)
            .field("time_layout", &self.time_layout)
            .finish_non_exhaustive()
    }
}
