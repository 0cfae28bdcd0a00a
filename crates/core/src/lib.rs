//! Core types and constants for the seedlock secret vault.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod constants;
pub mod crypto;
mod date_time;
mod secret;

pub use date_time::UtcDateTime;
pub use secret::SecretBytes;

use rand::{rngs::OsRng, CryptoRng, Rng};
use sha2::{Digest, Sha256};

/// Exposes the default cryptographically secure RNG.
pub fn csprng() -> impl CryptoRng + Rng {
    OsRng
}

/// Identifier for a stored secret.
pub type SecretId = uuid::Uuid;

/// Compute the checksum sealed with a secret.
///
/// The digest is appended to the secret before it is split, so it
/// is only recoverable together with the secret itself. The identifier
/// is mixed in so that equal secrets stored under different
/// identifiers do not share a digest.
pub fn secret_checksum(id: &SecretId, secret: &SecretBytes) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update(secret.expose());
    hasher.finalize().into()
}
