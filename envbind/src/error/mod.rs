//! Error types produced while declaring bindings and parsing raw values.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{BindError, BindResult, BoxError, ParseError};
