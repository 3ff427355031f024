//! Flag registry backed by `clap`.
//!
//! Bindings register a named long option together with a callback that
//! receives each raw occurrence. Nothing is parsed until
//! [`FlagSet::parse_from`] runs, at which point callbacks fire in
//! command-line order. Parsing stops at the first operand; it and everything
//! after it are kept as operands.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::dispatch::ValueKind;
use crate::error::{BindError, BindResult};
use crate::policy::ParseFailure;

/// Outcome of applying one raw flag value.
pub(crate) type FlagResult = Result<(), Box<ParseFailure>>;

/// Callback receiving one raw flag value.
pub(crate) type FlagCallback = Box<dyn FnMut(&str) -> FlagResult + Send>;

/// Id of the hidden positional collecting operands. The space keeps it
/// apart from every valid flag name.
const OPERANDS: &str = "trailing operands";

/// Registration record for one flag.
pub(crate) struct FlagSpec {
    pub(crate) name: String,
    pub(crate) usage: String,
    pub(crate) value_name: &'static str,
    pub(crate) switch: bool,
    pub(crate) callback: FlagCallback,
}

impl FlagSpec {
    pub(crate) fn new(
        name: &str,
        usage: &str,
        kind: Option<ValueKind>,
        callback: FlagCallback,
    ) -> Self {
        Self {
            name: name.to_owned(),
            usage: usage.to_owned(),
            value_name: kind.map_or("VALUE", ValueKind::value_name),
            switch: kind.is_some_and(ValueKind::is_switch),
            callback,
        }
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.usage.clone())
            .value_name(self.value_name)
            .action(ArgAction::Append)
            .value_parser(value_parser!(String));
        if self.switch {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.allow_hyphen_values(true)
        }
    }
}

/// Named flags awaiting the command-line parse.
pub(crate) struct FlagSet {
    program: String,
    flags: Vec<FlagSpec>,
    operands: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    pub(crate) fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flags: Vec::new(),
            operands: Vec::new(),
            parsed: false,
        }
    }

    pub(crate) const fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Arguments left after the flags, in command-line order.
    pub(crate) fn operands(&self) -> &[String] {
        &self.operands
    }

    /// Check that `name` can be registered.
    pub(crate) fn check(&self, name: &str) -> BindResult<()> {
        let invalid = |reason| BindError::InvalidFlagName {
            name: name.to_owned(),
            reason,
        };
        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.starts_with('-') {
            return Err(invalid("name must not start with '-'"));
        }
        if name.chars().any(|c| c.is_whitespace() || c == '=') {
            return Err(invalid("name must not contain whitespace or '='"));
        }
        if name == "help" {
            return Err(invalid("name is reserved for usage output"));
        }
        if self.parsed {
            return Err(BindError::BoundAfterParse {
                name: name.to_owned(),
            });
        }
        if self.contains(name) {
            return Err(BindError::DuplicateFlag {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    pub(crate) fn register(&mut self, spec: FlagSpec) -> BindResult<()> {
        self.check(&spec.name)?;
        tracing::debug!(flag = %spec.name, switch = spec.switch, "flag registered");
        self.flags.push(spec);
        Ok(())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag.name == name)
    }

    /// `clap` command describing every registered flag.
    pub(crate) fn command(&self) -> Command {
        let operands = Arg::new(OPERANDS)
            .num_args(1..)
            .trailing_var_arg(true)
            .allow_hyphen_values(true)
            .hide(true)
            .value_parser(value_parser!(String));
        let mut command = Command::new(self.program.clone()).arg(operands);
        for flag in &self.flags {
            command = command.arg(flag.to_arg());
        }
        command
    }

    pub(crate) fn render_usage(&self) -> String {
        self.command().render_help().to_string()
    }

    /// Parse `args` and feed every occurrence to its callback.
    ///
    /// The first element of `args` is the program name. Command-line errors
    /// abort before any callback runs; per-value failures go to
    /// `on_failure` and parsing continues.
    pub(crate) fn parse_from<I, T>(
        &mut self,
        args: I,
        mut on_failure: impl FnMut(ParseFailure),
    ) -> BindResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if self.parsed {
            return Err(BindError::AlreadyParsed);
        }
        self.parsed = true;
        let matches = self.command().try_get_matches_from(args)?;
        for (_, position, raw) in self.occurrences(&matches) {
            let Some(flag) = self.flags.get_mut(position) else {
                continue;
            };
            tracing::debug!(flag = %flag.name, "applying flag");
            if let Err(failure) = (flag.callback)(&raw) {
                on_failure(*failure);
            }
        }
        if let Ok(Some(operands)) = matches.try_get_many::<String>(OPERANDS) {
            self.operands = operands.cloned().collect();
            tracing::debug!(count = self.operands.len(), "operands collected");
        }
        Ok(())
    }

    /// Apply `raw` to a registered flag as if it appeared on the command line.
    pub(crate) fn set(&mut self, name: &str, raw: &str) -> BindResult<FlagResult> {
        let flag = self
            .flags
            .iter_mut()
            .find(|flag| flag.name == name)
            .ok_or_else(|| BindError::UnknownFlag {
                name: name.to_owned(),
            })?;
        Ok((flag.callback)(raw))
    }

    /// `(argv index, flag position, raw value)` sorted by argv index.
    ///
    /// Only registered flags are visited, so operands never reach a callback.
    fn occurrences(&self, matches: &ArgMatches) -> Vec<(usize, usize, String)> {
        let mut found = Vec::new();
        for (position, flag) in self.flags.iter().enumerate() {
            let Some(indices) = matches.indices_of(&flag.name) else {
                continue;
            };
            let Ok(Some(values)) = matches.try_get_many::<String>(&flag.name) else {
                continue;
            };
            found.extend(
                indices
                    .zip(values)
                    .map(|(index, raw)| (index, position, raw.clone())),
            );
        }
        found.sort_by_key(|(index, _, _)| *index);
        found
    }
}

#[cfg(test)]
mod tests;
