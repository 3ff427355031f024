//! Typed configuration variables resolved from flags, environment
//! variables and defaults.
//!
//! Each variable lives in a [`Target`] and is declared through a
//! [`Binder`]. Finalising a binding stores its default, then parses the
//! environment variable over it when one is present. Flags are applied
//! later by [`Binder::parse`], so the priority is always
//! flag > environment > default.
//!
//! ```
//! use std::time::Duration;
//!
//! use envbind::{Binder, ErrorPolicy, MapEnv, Target};
//! use url::Url;
//!
//! let env = MapEnv::new()
//!     .with("TIMEOUT", "1m30s")
//!     .with("UPSTREAM", "https://app.my-domain.com/home");
//! let mut binder = Binder::new()
//!     .with_env_source(env)
//!     .with_error_policy(ErrorPolicy::LogAndContinue);
//!
//! let timeout = Target::new(Duration::from_secs(5));
//! let upstream: Target<Option<Url>> = Target::default();
//! let ids: Target<Vec<u64>> = Target::default();
//!
//! binder.var(&timeout).bind("TIMEOUT", "timeout")?;
//! binder.var(&upstream).bind_env("UPSTREAM")?;
//! binder.var(&ids).with_flag_usage("ids to fetch").bind_flag("id")?;
//! binder.try_parse_from(["app", "--id", "1,2", "--id", "3"])?;
//!
//! assert_eq!(timeout.get(), Duration::from_secs(90));
//! assert_eq!(upstream.get().as_ref().and_then(Url::host_str), Some("app.my-domain.com"));
//! assert_eq!(ids.get(), vec![1, 2, 3]);
//! # Ok::<(), envbind::BindError>(())
//! ```
//!
//! Values that fail to parse never surface as `Result`s. They are handed
//! to the binder's [`ErrorPolicy`]: by default the diagnostic is written to
//! stderr and the process exits with status 2.

mod binder;
mod binding;
pub mod collection;
mod dispatch;
mod env;
mod error;
mod flags;
pub mod parsers;
mod pipeline;
mod policy;
mod settings;

pub use binder::Binder;
pub use binding::{Binding, CustomBinding, Target};
pub use dispatch::{Bindable, Scalar, ScalarKind, Shape, ValueKind, scalar_parser};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{BindError, BindResult, BoxError, ParseError, is_display_request};
pub use policy::{
    ErrorPolicy, ExitRecorder, FAILURE_EXIT_CODE, FailureHandler, ParseFailure, ProcessExit,
    Source, Terminator,
};
pub use settings::Settings;
