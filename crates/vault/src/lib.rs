//! Secret storage split across independently encrypted fragments.
//!
//! Saving a secret splits it into fragments, encrypts every fragment
//! under its own key and writes the complete [SecretRecord] in a single
//! store operation. Loading decrypts the fragments that can still be
//! opened and reconstructs the secret once the threshold is met.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod record;
mod store;
mod vault;

pub use error::Error;
pub use record::{EncryptedFragment, SecretRecord, SecretSummary};
pub use store::{FileRecordStore, MemoryRecordStore, RecordStore};
pub use vault::SecretVault;

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
