use thiserror::Error;

/// Errors generated by the logs library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a global subscriber is already set.
    #[error(transparent)]
    TryInit(#[from] tracing_subscriber::util::TryInitError),

    /// Error generated by the log filter directives.
    #[error(transparent)]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// Errors generated by the IO module.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
