use thiserror::Error;

/// Errors generated by the command line interface.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when the home directory cannot be located.
    #[error("unable to locate the data directory, set SEEDLOCK_DATA_DIR")]
    NoDataDir,

    /// Error generated when a secret read from the terminal is empty.
    #[error("secret must not be empty")]
    EmptySecret,

    /// Error generated when the secret is not valid UTF-8.
    #[error("secret is not valid UTF-8, use --raw to print hex")]
    NotUtf8,

    /// Errors generated by the vault.
    #[error(transparent)]
    Vault(#[from] seedlock_vault::Error),

    /// Errors generated by the secret sharing library.
    #[error(transparent)]
    Sharing(#[from] seedlock_sharing::Error),

    /// Errors generated by the logs library.
    #[error(transparent)]
    Logs(#[from] seedlock_logs::Error),

    /// Errors generated reading the config file.
    #[error(transparent)]
    TomlDeser(#[from] toml::de::Error),

    /// Errors generated writing the config file.
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    /// Errors generated by JSON output.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Errors generated reading from the terminal.
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Errors generated by the IO module.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the user interrupted a prompt.
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            Error::Readline(rustyline::error::ReadlineError::Interrupted)
        )
    }
}

impl From<etcetera::HomeDirError> for Error {
    fn from(_: etcetera::HomeDirError) -> Self {
        Error::NoDataDir
    }
}
