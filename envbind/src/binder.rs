//! Context object owning the flag registry, environment and error policy.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::Path;

#[cfg(feature = "serde_json")]
use serde::de::DeserializeOwned;

use crate::binding::{Binding, CustomBinding, Target};
use crate::dispatch::Bindable;
use crate::env::{EnvSource, ProcessEnv};
use crate::error::{BindError, BindResult, ParseError};
use crate::flags::FlagSet;
use crate::policy::{ErrorPolicy, Reporter, Terminator};
use crate::settings::Settings;

/// Declares bindings and triggers flag resolution.
///
/// Defaults and environment variables are applied while each binding is
/// finalised. Flags are applied by [`parse`](Self::parse), which must run
/// once after every binding has been declared.
///
/// # Examples
///
/// ```
/// use envbind::{Binder, MapEnv, Target};
///
/// let mut binder = Binder::new().with_env_source(MapEnv::new().with("PORT", "8080"));
/// let port = Target::new(0_u16);
/// binder
///     .var(&port)
///     .with_default(80)
///     .with_flag_usage("listen port")
///     .bind("PORT", "port")?;
/// assert_eq!(port.get(), 8080);
///
/// binder.try_parse_from(["server", "--port", "443"])?;
/// assert_eq!(port.get(), 443);
/// # Ok::<(), envbind::BindError>(())
/// ```
pub struct Binder {
    pub(crate) flags: FlagSet,
    pub(crate) env: Box<dyn EnvSource>,
    pub(crate) reporter: Reporter,
    pub(crate) settings: Settings,
    pub(crate) claimed_env: HashSet<String>,
}

impl Binder {
    /// Binder reading the process environment, named after the executable.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(program_name())
    }

    /// Binder whose usage output names `program`.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            flags: FlagSet::new(program),
            env: Box::new(ProcessEnv),
            reporter: Reporter::new(),
            settings: Settings::default(),
            claimed_env: HashSet::new(),
        }
    }

    /// Read environment variables from `env`.
    #[must_use]
    pub fn with_env_source(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Handle parse failures with `policy`.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.set_error_policy(policy);
        self
    }

    /// Write diagnostics and usage text to `output` instead of stderr.
    #[must_use]
    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.reporter.set_output(Box::new(output));
        self
    }

    /// End the process through `terminator`.
    ///
    /// [`ExitRecorder`](crate::ExitRecorder) keeps fatal failures observable
    /// in tests.
    #[must_use]
    pub fn with_terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.reporter.set_terminator(Box::new(terminator));
        self
    }

    /// Defaults copied into each new binding.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the error policy for bindings finalised from now on and for
    /// the flag parse.
    pub fn set_error_policy(&mut self, policy: ErrorPolicy) {
        self.reporter.set_policy(policy);
    }

    /// Current error policy.
    #[must_use]
    pub const fn error_policy(&self) -> &ErrorPolicy {
        self.reporter.policy()
    }

    /// Defaults applied to new bindings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start a binding for a builtin-typed target.
    pub fn var<T: Bindable>(&mut self, target: &Target<T>) -> Binding<'_, T> {
        Binding::new(self, target)
    }

    /// Start a binding that parses with `parser`.
    ///
    /// # Examples
    ///
    /// ```
    /// use envbind::{Binder, MapEnv, ParseError, Target};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// enum Level { Low, High }
    ///
    /// let mut binder = Binder::new().with_env_source(MapEnv::new().with("LEVEL", "high"));
    /// let level = Target::new(Level::Low);
    /// binder
    ///     .var_func(&level, |raw| match raw {
    ///         "low" => Ok(Level::Low),
    ///         "high" => Ok(Level::High),
    ///         other => Err(ParseError::custom(format!("unknown level {other}"))),
    ///     })
    ///     .bind_env("LEVEL")?;
    /// assert_eq!(level.get(), Level::High);
    /// # Ok::<(), envbind::BindError>(())
    /// ```
    pub fn var_func<T, F>(&mut self, target: &Target<T>, parser: F) -> CustomBinding<'_, T>
    where
        T: Send + 'static,
        F: Fn(&str) -> Result<T, ParseError> + Send + Sync + 'static,
    {
        CustomBinding::new(self, target, parser)
    }

    /// Start a binding that decodes its raw value as JSON.
    #[cfg(feature = "serde_json")]
    pub fn var_json<T>(&mut self, target: &Target<T>) -> CustomBinding<'_, T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        CustomBinding::new(self, target, |raw: &str| {
            serde_json::from_str(raw).map_err(ParseError::from)
        })
    }

    /// Bind `target` to `env` and `flag`, keeping its current value as the
    /// default.
    ///
    /// # Errors
    ///
    /// See [`Binding::bind`].
    pub fn bind_var<T: Bindable>(
        &mut self,
        target: &Target<T>,
        env: &str,
        flag: &str,
        usage: &str,
    ) -> BindResult<()> {
        self.var(target).with_flag_usage(usage).bind(env, flag)
    }

    /// Apply `raw` to the flag `name` as if it had been passed on the
    /// command line.
    ///
    /// A value that fails to parse goes to the error policy.
    ///
    /// The value counts as the flag's first occurrence: a sequence flag
    /// given again on the command line appends to it rather than replacing
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnknownFlag`] when no such flag is bound.
    pub fn set_flag(&mut self, name: &str, raw: &str) -> BindResult<()> {
        if let Err(failure) = self.flags.set(name, raw)? {
            self.reporter.report(&failure);
        }
        Ok(())
    }

    /// Help text listing every bound flag.
    #[must_use]
    pub fn usage(&self) -> String {
        self.flags.render_usage()
    }

    /// Whether the command line has been parsed.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        self.flags.is_parsed()
    }

    /// Operands left after the flags, in command-line order.
    ///
    /// Flag parsing stops at the first operand, so anything after it is
    /// returned here unparsed. Empty until the command line is parsed.
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.flags.operands()
    }

    /// Apply flags from `args`, whose first element is the program name.
    ///
    /// Values that fail to parse go to the error policy.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::CliParsing`] for unknown flags, missing values
    /// or help requests, and [`BindError::AlreadyParsed`] on a second call.
    pub fn try_parse_from<I, T>(&mut self, args: I) -> BindResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Self { flags, reporter, .. } = self;
        flags.parse_from(args, |failure| reporter.report(&failure))
    }

    /// Apply flags from `args`, handling command-line errors like a CLI.
    ///
    /// Help output and usage errors are written to the diagnostic output,
    /// then the terminator ends the process with status 0 for help and 2
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::AlreadyParsed`] on a second call.
    pub fn parse_from<I, T>(&mut self, args: I) -> BindResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.try_parse_from(args) {
            Err(BindError::CliParsing(err)) => {
                let code = err.exit_code();
                if code == 0 {
                    tracing::debug!("usage requested");
                } else {
                    tracing::error!(error = %err, "invalid command line");
                }
                self.reporter.write_text(&err.render().to_string());
                self.reporter.exit(code);
                Ok(())
            }
            other => other,
        }
    }

    /// Apply flags from the process arguments.
    ///
    /// # Errors
    ///
    /// See [`parse_from`](Self::parse_from).
    pub fn parse(&mut self) -> BindResult<()> {
        self.parse_from(std::env::args_os())
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("policy", self.error_policy())
            .field("settings", &self.settings)
            .field("claimed_env", &self.claimed_env)
            .field("parsed", &self.is_parsed())
            .finish_non_exhaustive()
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}
