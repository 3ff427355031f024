//! Default, environment and flag resolution for one binding.
//!
//! Finalising a binding runs [`resolve`]: names are validated and claimed,
//! the default is stored, a present environment variable is parsed over
//! it, and the flag callback is registered. The callback only runs when the
//! command line is parsed, so a flag always wins over the environment.

use std::ffi::{OsStr, OsString};

use crate::binder::Binder;
use crate::binding::Target;
use crate::collection::{Occurrence, Parser};
use crate::dispatch::ValueKind;
use crate::error::{BindError, BindResult, ParseError};
use crate::flags::{FlagCallback, FlagResult, FlagSpec};
use crate::policy::{ParseFailure, Source};

/// Merge rule applied when a flag value arrives.
pub(crate) type Accumulate<T> = fn(&mut T, T, Occurrence);

/// Everything needed to resolve one binding.
pub(crate) struct Plan<T> {
    pub(crate) target: Target<T>,
    pub(crate) default: Option<T>,
    pub(crate) env: Option<String>,
    pub(crate) flag: Option<String>,
    pub(crate) usage: String,
    pub(crate) parser: Parser<T>,
    pub(crate) accumulate: Accumulate<T>,
    pub(crate) type_name: String,
    pub(crate) kind: Option<ValueKind>,
}

/// Replace the stored value regardless of occurrence.
pub(crate) fn replace<T>(current: &mut T, parsed: T, _occurrence: Occurrence) {
    *current = parsed;
}

/// Run the resolution pipeline for `plan` against `binder`.
pub(crate) fn resolve<T>(binder: &mut Binder, plan: Plan<T>) -> BindResult<()>
where
    T: Send + 'static,
{
    let Plan {
        target,
        default,
        env,
        flag,
        usage,
        parser,
        accumulate,
        type_name,
        kind,
    } = plan;

    if let Some(flag) = flag.as_deref() {
        binder.flags.check(flag)?;
    }
    if let Some(env) = env.as_deref()
        && !binder.claimed_env.insert(env.to_owned())
    {
        return Err(BindError::DuplicateEnv {
            name: env.to_owned(),
        });
    }

    if let Some(value) = default {
        target.set(value);
        tracing::debug!(target_type = %type_name, "default applied");
    }

    if let Some(name) = env.as_deref()
        && let Some(value) = lookup(binder, name)
    {
        apply_env(
            binder,
            &target,
            &parser,
            name,
            &value,
            &type_name,
            flag.as_deref(),
        );
    }

    if let Some(name) = flag {
        let callback = flag_callback(target, parser, accumulate, type_name, env, name.clone());
        binder
            .flags
            .register(FlagSpec::new(&name, &usage, kind, callback))?;
    }
    Ok(())
}

fn lookup(binder: &Binder, name: &str) -> Option<OsString> {
    let value = binder.env.var_os(name)?;
    if value.is_empty() && binder.settings.empty_env_is_unset() {
        tracing::debug!(env = name, "empty environment variable treated as unset");
        return None;
    }
    Some(value)
}

fn apply_env<T>(
    binder: &mut Binder,
    target: &Target<T>,
    parser: &Parser<T>,
    name: &str,
    value: &OsStr,
    type_name: &str,
    flag: Option<&str>,
) {
    let parsed = match value.to_str() {
        Some(raw) => parser(raw).map_err(|error| (raw.to_owned(), error)),
        None => Err((value.to_string_lossy().into_owned(), ParseError::NotUnicode)),
    };
    match parsed {
        Ok(parsed) => {
            target.set(parsed);
            tracing::debug!(env = name, "environment variable applied");
        }
        Err((raw, error)) => {
            let failure = ParseFailure::new(
                Source::Environment,
                raw,
                type_name,
                Some(name),
                flag,
                error,
            );
            binder.reporter.report(&failure);
        }
    }
}

fn flag_callback<T>(
    target: Target<T>,
    parser: Parser<T>,
    accumulate: Accumulate<T>,
    type_name: String,
    env: Option<String>,
    flag: String,
) -> FlagCallback
where
    T: Send + 'static,
{
    let mut occurrence = Occurrence::First;
    Box::new(move |raw: &str| -> FlagResult {
        let parsed = parser(raw).map_err(|error| {
            Box::new(ParseFailure::new(
                Source::Flag,
                raw,
                type_name.as_str(),
                env.as_deref(),
                Some(flag.as_str()),
                error,
            ))
        })?;
        target.update(|current| accumulate(current, parsed, occurrence));
        occurrence = Occurrence::Repeat;
        tracing::debug!(flag = %flag, "flag applied");
        Ok(())
    })
}
