//! Builders describing how one variable is resolved.
//!
//! A [`Binding`] wraps a builtin target type and picks its parser from the
//! type. A [`CustomBinding`] carries a caller-supplied parser instead. Both
//! are consumed by their finalisers, which run the resolution pipeline.

mod target;

use std::sync::Arc;

use crate::binder::Binder;
use crate::collection::Parser;
use crate::dispatch::Bindable;
use crate::error::{BindResult, BoxError, ParseError};
use crate::parsers::ParseOptions;
use crate::pipeline::{self, Plan};

pub use target::Target;

/// Chainable description of a builtin-typed variable.
///
/// Created by [`Binder::var`]. Without [`with_default`](Self::with_default)
/// the value already in the target acts as the default.
///
/// # Examples
///
/// ```
/// use envbind::{Binder, MapEnv, Target};
///
/// let mut binder = Binder::new().with_env_source(MapEnv::new().with("IDS", "1;3;4"));
/// let ids: Target<Vec<i64>> = Target::default();
/// binder
///     .var(&ids)
///     .with_slice_separator(";")
///     .with_flag_usage("identifiers to process")
///     .bind("IDS", "ids")?;
/// assert_eq!(ids.get(), vec![1, 3, 4]);
/// # Ok::<(), envbind::BindError>(())
/// ```
#[must_use = "a binding has no effect until bind, bind_env or bind_flag is called"]
pub struct Binding<'b, T: Bindable> {
    binder: &'b mut Binder,
    target: Target<T>,
    default: Option<T>,
    usage: String,
    options: ParseOptions,
}

impl<'b, T: Bindable> Binding<'b, T> {
    pub(crate) fn new(binder: &'b mut Binder, target: &Target<T>) -> Self {
        let options = binder.settings().parse_options().clone();
        Self {
            binder,
            target: target.clone(),
            default: None,
            usage: String::new(),
            options,
        }
    }

    /// Value stored when the binding is finalised.
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Help text shown next to the flag in usage output.
    pub fn with_flag_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Separator for sequence targets.
    ///
    /// An empty separator keeps the whole value as one element.
    pub fn with_slice_separator(mut self, separator: impl Into<String>) -> Self {
        self.options = self.options.with_separator(separator);
        self
    }

    /// Decoder for `Vec<u8>` targets and their sequences.
    ///
    /// See [`parsers::decoders`](crate::parsers::decoders) for the builtin
    /// codecs.
    pub fn with_string_decoder<F>(mut self, decoder: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
    {
        self.options = self.options.with_decoder(decoder);
        self
    }

    /// `chrono` strftime layout for timestamp targets.
    pub fn with_time_layout(mut self, layout: impl Into<String>) -> Self {
        self.options = self.options.with_time_layout(layout);
        self
    }

    /// Resolve from the environment variable `env` and the flag `flag`.
    ///
    /// An empty name disables that source.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`](crate::BindError) when either name is
    /// already bound, the flag name is invalid, or flags were already
    /// parsed. Values that fail to parse go to the error policy instead.
    pub fn bind(self, env: &str, flag: &str) -> BindResult<()> {
        self.finish(non_empty(env), non_empty(flag))
    }

    /// Resolve from the environment variable `env` only.
    ///
    /// # Errors
    ///
    /// See [`bind`](Self::bind).
    pub fn bind_env(self, env: &str) -> BindResult<()> {
        self.finish(non_empty(env), None)
    }

    /// Resolve from the flag `flag` only.
    ///
    /// # Errors
    ///
    /// See [`bind`](Self::bind).
    pub fn bind_flag(self, flag: &str) -> BindResult<()> {
        self.finish(None, non_empty(flag))
    }

    fn finish(self, env: Option<String>, flag: Option<String>) -> BindResult<()> {
        let plan = Plan {
            target: self.target,
            default: self.default,
            env,
            flag,
            usage: self.usage,
            parser: T::parser(&self.options),
            accumulate: T::accumulate,
            type_name: T::type_name(),
            kind: Some(T::KIND),
        };
        pipeline::resolve(self.binder, plan)
    }
}

/// Chainable description of a variable with its own parser.
///
/// Created by [`Binder::var_func`] and [`Binder::var_json`]. Any type can
/// be bound this way; every flag occurrence replaces the stored value.
#[must_use = "a binding has no effect until bind, bind_env or bind_flag is called"]
pub struct CustomBinding<'b, T> {
    binder: &'b mut Binder,
    target: Target<T>,
    default: Option<T>,
    usage: String,
    parser: Parser<T>,
}

impl<'b, T: Send + 'static> CustomBinding<'b, T> {
    pub(crate) fn new<F>(binder: &'b mut Binder, target: &Target<T>, parser: F) -> Self
    where
        F: Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        Self {
            binder,
            target: target.clone(),
            default: None,
            usage: String::new(),
            parser: Arc::new(parser),
        }
    }

    /// Value stored when the binding is finalised.
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Help text shown next to the flag in usage output.
    pub fn with_flag_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Resolve from the environment variable `env` and the flag `flag`.
    ///
    /// # Errors
    ///
    /// See [`Binding::bind`].
    pub fn bind(self, env: &str, flag: &str) -> BindResult<()> {
        self.finish(non_empty(env), non_empty(flag))
    }

    /// Resolve from the environment variable `env` only.
    ///
    /// # Errors
    ///
    /// See [`Binding::bind`].
    pub fn bind_env(self, env: &str) -> BindResult<()> {
        self.finish(non_empty(env), None)
    }

    /// Resolve from the flag `flag` only.
    ///
    /// # Errors
    ///
    /// See [`Binding::bind`].
    pub fn bind_flag(self, flag: &str) -> BindResult<()> {
        self.finish(None, non_empty(flag))
    }

    fn finish(self, env: Option<String>, flag: Option<String>) -> BindResult<()> {
        let plan = Plan {
            target: self.target,
            default: self.default,
            env,
            flag,
            usage: self.usage,
            parser: self.parser,
            accumulate: pipeline::replace,
            type_name: short_type_name::<T>(),
            kind: None,
        };
        pipeline::resolve(self.binder, plan)
    }
}

fn non_empty(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_owned())
}

/// `std::any::type_name` with module paths removed, e.g. `Vec<Colour>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    fn last_segment(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }

    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            out.push_str(last_segment(&path));
            path.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&path));
    out
}

#[cfg(test)]
mod tests;
