//! In-memory writer for capturing diagnostics.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable byte buffer implementing [`Write`].
///
/// Hand one clone to the code under test and read the other.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use envbind_test_helpers::output::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let mut sink = buffer.clone();
/// sink.write_all(b"unable to parse\n").ok();
/// assert_eq!(buffer.contents(), "unable to parse\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
