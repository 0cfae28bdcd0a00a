//! Nonce and encrypted payload types.
use crate::{constants::NONCE_SIZE, csprng};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Standard 12 byte nonce used by AES-GCM.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy)]
#[serde(transparent)]
pub struct Nonce(#[serde_as(as = "Base64")] [u8; NONCE_SIZE]);

impl Nonce {
    /// Generate a new random nonce.
    pub fn new_random() -> Nonce {
        let val: [u8; NONCE_SIZE] = csprng().gen();
        Nonce(val)
    }
}

impl From<[u8; NONCE_SIZE]> for Nonce {
    fn from(value: [u8; NONCE_SIZE]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encrypted data with the nonce.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct AeadPack {
    /// Number once value.
    pub nonce: Nonce,
    /// Encrypted cipher text including the authentication tag.
    #[serde_as(as = "Base64")]
    pub ciphertext: Vec<u8>,
}
