use seedlock_core::SecretId;
use thiserror::Error;

/// Errors generated by the vault library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when the threshold and fragment count
    /// are not valid.
    #[error("invalid sharing parameters, threshold {threshold} of {total} fragments")]
    InvalidParameters {
        /// Requested threshold.
        threshold: u8,
        /// Requested number of fragments.
        total: usize,
    },

    /// Error generated when attempting to save an empty secret.
    #[error("cannot save an empty secret")]
    EmptySecret,

    /// Error generated when decrypted fragments differ in length.
    #[error("fragment length mismatch, expected {expected} bytes but got {found}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Length of the offending fragment.
        found: usize,
    },

    /// Error generated when too few fragments could be decrypted
    /// to reconstruct a secret.
    #[error("insufficient fragments, {decrypted} decrypted but {required} required")]
    InsufficientFragments {
        /// Number of fragments decrypted successfully.
        decrypted: usize,
        /// Threshold required for reconstruction.
        required: u8,
    },

    /// Error generated when splitting a secret fails.
    #[error("failed to split secret: {0}")]
    SplitFailure(#[source] seedlock_sharing::Error),

    /// Error generated when reconstructing a secret fails.
    #[error("failed to reconstruct secret: {0}")]
    ReconstructFailure(#[source] seedlock_sharing::Error),

    /// Error generated when encrypting a fragment fails.
    #[error("failed to encrypt fragment {index}: {source}")]
    EncryptionFailure {
        /// Index of the fragment.
        index: u8,
        /// Cause of the failure.
        #[source]
        source: seedlock_keystore::Error,
    },

    /// Error generated when a fragment does not authenticate,
    /// it was tampered with or the key is wrong.
    #[error("fragment {index} failed authentication")]
    AuthenticationFailure {
        /// Index of the fragment.
        index: u8,
    },

    /// Error generated when the key for a fragment is
    /// permanently unavailable.
    #[error("key for fragment {index} is unavailable")]
    KeyUnavailable {
        /// Index of the fragment.
        index: u8,
    },

    /// Error generated when a key is used outside of
    /// an authenticated session.
    #[error("session expired")]
    SessionExpired,

    /// Error generated when the presence check fails.
    #[error("presence check failed: {0}")]
    PresenceDenied(String),

    /// Error generated when a secret record does not exist.
    #[error("secret {0} not found")]
    NotFound(SecretId),

    /// Error generated when a reconstructed secret does not
    /// match the checksum sealed inside its fragments.
    #[error("integrity check failed for secret {0}")]
    IntegrityCheckFailed(SecretId),

    /// Error generated when a record is missing fragment slots.
    #[error("record for secret {0} is incomplete")]
    IncompleteRecord(SecretId),

    /// Error generated when some fragment keys could not be
    /// deleted after the record was removed.
    #[error("failed to delete keys {}", aliases.join(", "))]
    KeyCleanup {
        /// Aliases of the keys that remain.
        aliases: Vec<String>,
    },

    /// Errors generated by the key store.
    #[error(transparent)]
    Keystore(seedlock_keystore::Error),

    /// Errors generated by the record store.
    #[error(transparent)]
    StoreIo(#[from] std::io::Error),
}

impl From<seedlock_sharing::Error> for Error {
    fn from(value: seedlock_sharing::Error) -> Self {
        use seedlock_sharing::Error as Sharing;
        match value {
            Sharing::InvalidParameters { threshold, total } => {
                Error::InvalidParameters { threshold, total }
            }
            Sharing::EmptySecret => Error::EmptySecret,
            Sharing::LengthMismatch { expected, found } => {
                Error::LengthMismatch { expected, found }
            }
            Sharing::InsufficientFragments { found, required } => {
                Error::InsufficientFragments {
                    decrypted: found,
                    required,
                }
            }
            e => Error::ReconstructFailure(e),
        }
    }
}

impl From<seedlock_session::Error> for Error {
    fn from(value: seedlock_session::Error) -> Self {
        match value {
            seedlock_session::Error::SessionExpired => Error::SessionExpired,
            seedlock_session::Error::PresenceDenied(reason) => {
                Error::PresenceDenied(reason)
            }
        }
    }
}

impl From<seedlock_keystore::Error> for Error {
    fn from(value: seedlock_keystore::Error) -> Self {
        match value {
            seedlock_keystore::Error::Session(e) => e.into(),
            e => Error::Keystore(e),
        }
    }
}

impl Error {
    /// Whether the error is a session error that needs a fresh
    /// presence check before retrying.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::SessionExpired | Error::PresenceDenied(_))
    }
}
