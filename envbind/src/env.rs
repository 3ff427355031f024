//! Environment variable accessors.
//!
//! The resolution pipeline only needs a name-to-value lookup, so the process
//! environment sits behind [`EnvSource`]. [`MapEnv`] is an in-memory source
//! for tests and for embedding callers that assemble the environment
//! themselves.

use std::collections::HashMap;
use std::ffi::OsString;

/// Lookup of environment variables by name.
pub trait EnvSource: Send {
    /// Value of `name`, or `None` when the variable is not set.
    fn var_os(&self, name: &str) -> Option<OsString>;
}

/// Reads the environment of the current process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// Fixed set of variables held in memory.
///
/// # Examples
///
/// ```
/// use envbind::{EnvSource, MapEnv};
///
/// let env = MapEnv::new().with("PORT", "8080");
/// assert_eq!(env.var_os("PORT").as_deref(), Some("8080".as_ref()));
/// assert!(env.var_os("HOST").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: HashMap<String, OsString>,
}

impl MapEnv {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.set(name, value);
        self
    }

    /// Add or replace a variable in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<OsString> {
        self.vars.remove(name)
    }
}

impl EnvSource for MapEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
