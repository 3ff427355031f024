//! Process termination behind a trait so fatal failures stay observable.

use std::sync::Arc;

use parking_lot::Mutex;

/// Ends the process with a status code.
pub trait Terminator: Send {
    /// Terminate with `code`.
    ///
    /// Implementations used outside tests should not return.
    fn exit(&self, code: i32);
}

/// Calls [`std::process::exit`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Records exit codes instead of terminating.
///
/// Clones share the same record, so a test keeps one handle and gives the
/// other to the binder.
///
/// # Examples
///
/// ```
/// use envbind::{ExitRecorder, Terminator};
///
/// let recorder = ExitRecorder::new();
/// recorder.clone().exit(2);
/// assert_eq!(recorder.last(), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExitRecorder {
    codes: Arc<Mutex<Vec<i32>>>,
}

impl ExitRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every exit code requested so far, oldest first.
    #[must_use]
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().clone()
    }

    /// Most recently requested exit code.
    #[must_use]
    pub fn last(&self) -> Option<i32> {
        self.codes.lock().last().copied()
    }
}

impl Terminator for ExitRecorder {
    fn exit(&self, code: i32) {
        tracing::debug!(code, "exit suppressed by recorder");
        self.codes.lock().push(code);
    }
}
