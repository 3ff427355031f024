//! Helpers for classifying command-line errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::BindError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Such requests are not failures: [`Binder::parse`](crate::Binder::parse)
/// renders them and terminates with status 0, while genuine command-line
/// errors terminate with status 2.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl BindError {
    /// Exit status a command-line tool should use for this error.
    ///
    /// Help requests map to 0; every other error maps to 2, the status
    /// conventionally used for usage errors.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CliParsing(err) if is_display_request(err) => 0,
            _ => 2,
        }
    }
}
