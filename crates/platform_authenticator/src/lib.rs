//! Platform keyring and authenticator support for the seedlock secret vault.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
mod error;

pub mod keyring_keys;
pub mod local_auth;

pub use error::Error;
pub use keyring_keys::KeyringKeyStore;
pub use local_auth::LocalAuthenticator;

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
