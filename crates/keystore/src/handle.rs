use crate::{Error, Result};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretBox};
use seedlock_core::{constants::KEY_SIZE, csprng};
use std::fmt;

/// Symmetric 256-bit key fetched from a key store.
///
/// Key material is zeroed when the handle is dropped.
pub struct KeyHandle {
    alias: String,
    material: SecretBox<[u8; KEY_SIZE]>,
}

impl KeyHandle {
    /// Create a key handle from key material.
    pub fn new(alias: impl Into<String>, material: [u8; KEY_SIZE]) -> Self {
        Self {
            alias: alias.into(),
            material: SecretBox::new(Box::new(material)),
        }
    }

    /// Generate a new random key.
    pub fn generate(alias: impl Into<String>) -> Self {
        let mut material = [0u8; KEY_SIZE];
        csprng().fill_bytes(&mut material);
        let key = Self::new(alias, material);
        zeroize::Zeroize::zeroize(&mut material);
        key
    }

    /// Create a key handle from a slice of key material.
    pub fn from_slice(alias: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let alias = alias.into();
        let material: [u8; KEY_SIZE] =
            bytes.try_into().map_err(|_| Error::KeyLength {
                alias: alias.clone(),
                length: bytes.len(),
            })?;
        Ok(Self::new(alias, material))
    }

    /// Alias of the key in the key store.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Expose the key material.
    pub fn expose_secret(&self) -> &[u8; KEY_SIZE] {
        self.material.expose_secret()
    }
}

impl Clone for KeyHandle {
    fn clone(&self) -> Self {
        Self::new(self.alias.clone(), *self.material.expose_secret())
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("alias", &self.alias)
            .finish_non_exhaustive()
    }
}
