//! Fragment keys and envelope encryption.
//!
//! Every fragment of a secret is encrypted under its own 256-bit key
//! held by a [KeyStore]. The [KeyManager] names those keys, creates and
//! deletes them, and routes access through the session: while the
//! session is authenticated the standing key variant is used, otherwise
//! the presence-gated variant which requires a fresh presence check.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod envelope;
mod error;
mod handle;
mod manager;
mod store;

pub use error::Error;
pub use handle::KeyHandle;
pub use manager::{select_key_alias, KeyManager, KeyVariant};
pub use store::{KeyStore, MemoryKeyStore};

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
