use thiserror::Error;

/// Errors generated by the session library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error generated when an operation requires an authenticated
    /// session but the session has ended or timed out.
    #[error("session expired")]
    SessionExpired,

    /// Error generated when the presence check did not succeed.
    #[error("presence check failed: {0}")]
    PresenceDenied(String),
}
