use thiserror::Error;

/// Errors generated by the key store library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a key was permanently invalidated,
    /// for example by a change in the presence-check enrollment.
    #[error("key {0} was permanently invalidated")]
    KeyInvalidated(String),

    /// Error generated when an existing key was expected.
    #[error("key {0} not found")]
    KeyNotFound(String),

    /// Error generated when key material has the wrong length.
    #[error("key {alias} has invalid length {length}")]
    KeyLength {
        /// Key alias.
        alias: String,
        /// Length of the material.
        length: usize,
    },

    /// Error generated by the backing key store.
    #[error("key store: {0}")]
    KeyStore(String),

    /// Error generated when the authentication tag does not match,
    /// the ciphertext was tampered with or the key or nonce is wrong.
    #[error("authentication failure decrypting with key {0}")]
    AuthenticationFailure(String),

    /// Error generated when encryption fails.
    #[error("failed to encrypt with key {0}")]
    Encrypt(String),

    /// Errors generated by the session gate.
    #[error(transparent)]
    Session(#[from] seedlock_session::Error),

    /// Error generated when a blocking key store task fails.
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}
