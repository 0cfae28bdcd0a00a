use thiserror::Error;

/// Errors generated by the platform authenticator library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when no keyring entry exists for an alias.
    #[error("no keyring entry")]
    NoKeyringEntry,

    /// Error generated when the platform keyring is not available.
    #[error("platform keyring is not supported")]
    Unsupported,

    /// Error generated decoding key material from hex.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    /// Error generated converting bytes to UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// Error generated by the keyring library.
    #[cfg(all(not(target_os = "macos"), not(target_os = "android")))]
    #[error(transparent)]
    Keyring(#[from] keyring::Error),

    /// Error generated by the security framework.
    #[cfg(target_os = "macos")]
    #[error(transparent)]
    SecurityFramework(#[from] security_framework::base::Error),
}

impl From<Error> for seedlock_keystore::Error {
    fn from(value: Error) -> Self {
        seedlock_keystore::Error::KeyStore(value.to_string())
    }
}
