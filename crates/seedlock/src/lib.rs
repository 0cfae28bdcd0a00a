//! Command line interface for the seedlock secret vault.
#![forbid(unsafe_code)]

/// Target for tracing macros.
///
/// Used so that error messages are succinct rather than
/// including the full module path.
pub const TARGET: &str = "seedlock";

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub(crate) mod helpers;

pub use error::Error;

/// Result type for the executable.
pub type Result<T> = std::result::Result<T, error::Error>;
