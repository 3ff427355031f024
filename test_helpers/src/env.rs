//! Guards for mutating process environment variables in tests.
//!
//! Every mutation and every restoration runs under one global re-entrant
//! lock. Hold a [`Scope`] when a test reads the environment after setting
//! several variables, so no other guard interleaves.
//!
//! # Examples
//!
//! ```
//! use envbind_test_helpers::env;
//!
//! let _scope = env::scope([("APP_PORT", Some("8080")), ("APP_HOST", None)]);
//! assert_eq!(std::env::var("APP_PORT").ok().as_deref(), Some("8080"));
//! assert!(std::env::var_os("APP_HOST").is_none());
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one variable to its previous state when dropped.
#[must_use = "dropping restores the prior value"]
pub struct VarGuard {
    key: String,
    previous: Option<OsString>,
}

impl fmt::Debug for VarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarGuard")
            .field("key", &self.key)
            .field("was_set", &self.previous.is_some())
            .finish()
    }
}

impl Drop for VarGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        write(&self.key, self.previous.take().as_deref());
    }
}

/// Holds the environment lock and a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping restores the variables and releases the lock"]
pub struct Scope {
    guards: Vec<VarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Set `key` to `value` until the guard drops.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> VarGuard {
    replace(key.into(), Some(value.as_ref()))
}

/// Unset `key` until the guard drops.
pub fn remove_var(key: impl Into<String>) -> VarGuard {
    replace(key.into(), None)
}

/// Apply every `(key, value)` pair, unsetting keys whose value is `None`,
/// and keep the lock until the scope drops.
pub fn scope<I, K, V>(vars: I) -> Scope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = ENV_LOCK.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| replace(key.into(), value.as_ref().map(AsRef::as_ref)))
        .collect();
    Scope {
        guards,
        _lock: lock,
    }
}

/// Run `f` while holding the environment lock.
pub fn with_lock<R>(f: impl FnOnce() -> R) -> R {
    let _lock = ENV_LOCK.lock();
    f()
}

fn replace(key: String, value: Option<&OsStr>) -> VarGuard {
    let _lock = ENV_LOCK.lock();
    let previous = std::env::var_os(&key);
    write(&key, value);
    VarGuard { key, previous }
}

fn write(key: &str, value: Option<&OsStr>) {
    match value {
        // SAFETY: callers hold `ENV_LOCK`.
        Some(value) => unsafe { std::env::set_var(key, value) },
        // SAFETY: callers hold `ENV_LOCK`.
        None => unsafe { std::env::remove_var(key) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    #[test]
    fn guard_restores_previous_value() {
        let _outer = set_var("ENVBIND_HELPER_RESTORE", "original");
        {
            let _inner = set_var("ENVBIND_HELPER_RESTORE", "changed");
            assert_eq!(read("ENVBIND_HELPER_RESTORE").as_deref(), Some("changed"));
        }
        assert_eq!(read("ENVBIND_HELPER_RESTORE").as_deref(), Some("original"));
    }

    #[test]
    fn removed_variable_comes_back() {
        let _outer = set_var("ENVBIND_HELPER_REMOVE", "kept");
        {
            let _gone = remove_var("ENVBIND_HELPER_REMOVE");
            assert!(read("ENVBIND_HELPER_REMOVE").is_none());
        }
        assert_eq!(read("ENVBIND_HELPER_REMOVE").as_deref(), Some("kept"));
    }

    #[test]
    fn scope_unsets_new_keys_on_drop() {
        {
            let _scope = scope([
                ("ENVBIND_HELPER_A", Some("1")),
                ("ENVBIND_HELPER_B", None),
            ]);
            assert_eq!(read("ENVBIND_HELPER_A").as_deref(), Some("1"));
            let nested = set_var("ENVBIND_HELPER_B", "2");
            assert_eq!(read("ENVBIND_HELPER_B").as_deref(), Some("2"));
            drop(nested);
        }
        assert!(read("ENVBIND_HELPER_A").is_none());
        assert!(read("ENVBIND_HELPER_B").is_none());
    }
}
