//! Error policy applied when a raw value fails to parse.
//!
//! Parse failures never propagate as `Result`s from binding calls. They are
//! handed to a single [`ErrorPolicy`] at the point of failure, which decides
//! whether to log, exit, or carry on. The target keeps whatever value it
//! held before the failed parse.

mod failure;
mod terminator;

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

pub use failure::{ParseFailure, Source};
pub use terminator::{ExitRecorder, ProcessExit, Terminator};

/// Exit status used for fatal parse failures.
pub const FAILURE_EXIT_CODE: i32 = 2;

/// Handler signature accepted by [`ErrorPolicy::Custom`].
pub type FailureHandler = Arc<dyn Fn(&ParseFailure) + Send + Sync>;

/// Strategy invoked for every parse failure.
#[derive(Clone, Default)]
#[non_exhaustive]
pub enum ErrorPolicy {
    /// Write the diagnostic and terminate with status 2.
    #[default]
    Exit,
    /// Write the diagnostic and keep the previous value.
    LogAndContinue,
    /// Keep the previous value silently.
    Ignore,
    /// Delegate to a caller-supplied handler.
    Custom(FailureHandler),
}

impl ErrorPolicy {
    /// Build a [`ErrorPolicy::Custom`] policy from a closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::ErrorPolicy;
    /// let policy = ErrorPolicy::custom(|failure| {
    ///     tracing::warn!(name = failure.name(), "ignoring bad value");
    /// });
    /// assert!(matches!(policy, ErrorPolicy::Custom(_)));
    /// ```
    #[must_use]
    pub fn custom<F>(handler: F) -> Self
    where
        F: Fn(&ParseFailure) + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(handler))
    }
}

impl fmt::Debug for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("Exit"),
            Self::LogAndContinue => f.write_str("LogAndContinue"),
            Self::Ignore => f.write_str("Ignore"),
            Self::Custom(_) => f.write_str("Custom(<handler>)"),
        }
    }
}

/// Applies the policy, owning the diagnostic sink and terminator.
pub(crate) struct Reporter {
    policy: ErrorPolicy,
    output: Box<dyn Write + Send>,
    terminator: Box<dyn Terminator>,
}

impl Reporter {
    pub(crate) fn new() -> Self {
        Self {
            policy: ErrorPolicy::default(),
            output: Box::new(io::stderr()),
            terminator: Box::new(ProcessExit),
        }
    }

    pub(crate) fn set_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    pub(crate) fn set_output(&mut self, output: Box<dyn Write + Send>) {
        self.output = output;
    }

    pub(crate) fn set_terminator(&mut self, terminator: Box<dyn Terminator>) {
        self.terminator = terminator;
    }

    pub(crate) const fn policy(&self) -> &ErrorPolicy {
        &self.policy
    }

    pub(crate) fn report(&mut self, failure: &ParseFailure) {
        match &self.policy {
            ErrorPolicy::Exit => {
                self.write_line(failure);
                tracing::error!(
                    origin = %failure.origin(),
                    name = failure.name(),
                    raw = failure.raw(),
                    error = %failure.error(),
                    "fatal configuration parse failure"
                );
                self.terminator.exit(FAILURE_EXIT_CODE);
            }
            ErrorPolicy::LogAndContinue => {
                self.write_line(failure);
                tracing::warn!(
                    origin = %failure.origin(),
                    name = failure.name(),
                    raw = failure.raw(),
                    error = %failure.error(),
                    "keeping previous value after parse failure"
                );
            }
            ErrorPolicy::Ignore => {
                tracing::debug!(
                    origin = %failure.origin(),
                    name = failure.name(),
                    error = %failure.error(),
                    "ignoring parse failure"
                );
            }
            ErrorPolicy::Custom(handler) => handler(failure),
        }
    }

    /// Write an arbitrary message to the diagnostic sink.
    pub(crate) fn write_text(&mut self, text: &str) {
        if let Err(err) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
        {
            tracing::warn!(%err, "failed to write diagnostic");
        }
    }

    pub(crate) fn exit(&self, code: i32) {
        self.terminator.exit(code);
    }

    fn write_line(&mut self, failure: &ParseFailure) {
        self.write_text(&format!("{failure}\n"));
    }
}

#[cfg(test)]
mod tests;
