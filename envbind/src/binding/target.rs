//! Shared storage for a bound configuration variable.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// Handle to the storage a binding writes into.
///
/// Cloning the handle shares the storage. Flag resolution is deferred until
/// [`Binder::parse`](crate::Binder::parse), so the binder keeps its own
/// clone alive for as long as it may still write.
///
/// # Examples
///
/// ```
/// use envbind::Target;
///
/// let port = Target::new(80_u16);
/// let alias = port.clone();
/// alias.set(8080);
/// assert_eq!(port.get(), 8080);
/// ```
pub struct Target<T> {
    cell: Arc<Mutex<T>>,
}

impl<T> Target<T> {
    /// Create a target holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            cell: Arc::new(Mutex::new(initial)),
        }
    }

    /// Overwrite the stored value.
    pub fn set(&self, value: T) {
        *self.cell.lock() = value;
    }

    /// Overwrite the stored value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.cell.lock(), value)
    }

    /// Run `f` against the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.cell.lock();
        f(&*guard)
    }

    /// Run `f` against the stored value with write access.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.cell.lock();
        f(&mut *guard)
    }

    /// Lock the storage for direct access.
    ///
    /// Holding the guard across [`Binder::parse`](crate::Binder::parse)
    /// deadlocks the flag callbacks.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.cell.lock()
    }
}

impl<T: Clone> Target<T> {
    /// Clone the stored value out.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.lock().clone()
    }
}

impl<T: Default> Target<T> {
    /// Take the stored value, leaving `T::default()` behind.
    #[must_use]
    pub fn take(&self) -> T {
        std::mem::take(&mut *self.cell.lock())
    }
}

impl<T: Default> Default for Target<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Target<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&*self.cell.lock()).finish()
    }
}
