//! Test helpers shared across the envbind workspace.
//!
//! - [`env`]: serialised, self-restoring process environment mutations.
//! - [`output`]: an in-memory sink for captured diagnostics.

pub mod env;
pub mod output;
