//! Stored representation of a split secret.
use seedlock_core::{crypto::AeadPack, SecretId, UtcDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Fragment value encrypted under its own key.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedFragment {
    /// Index of the fragment.
    pub index: u8,
    /// Alias of the key that encrypted the fragment.
    pub key_alias: String,
    /// Nonce and ciphertext.
    #[serde(flatten)]
    pub aead: AeadPack,
}

/// Record of a secret split into encrypted fragments.
///
/// Records are written whole; a record never exists with
/// fewer fragments than it was split into.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretRecord {
    /// Identifier of the secret.
    pub id: SecretId,
    /// User-facing label.
    pub alias: String,
    /// Time the secret was first saved.
    pub created_at: UtcDateTime,
    /// Fragments needed to reconstruct.
    pub threshold: u8,
    /// Fragments the secret was split into.
    pub total: u8,
    /// Encrypted fragments by index.
    pub fragments: BTreeMap<u8, EncryptedFragment>,
    /// Fragments whose key was permanently invalidated.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub damaged: BTreeSet<u8>,
}

impl SecretRecord {
    /// Number of fragments whose key has not been invalidated.
    pub fn healthy(&self) -> usize {
        self.fragments
            .keys()
            .filter(|index| !self.damaged.contains(index))
            .count()
    }

    /// Whether enough healthy fragments remain to reconstruct.
    pub fn is_recoverable(&self) -> bool {
        self.healthy() >= self.threshold as usize
    }

    /// Whether every fragment slot is written.
    pub fn is_complete(&self) -> bool {
        self.fragments.len() == self.total as usize
            && (1..=self.total).all(|index| {
                self.fragments
                    .get(&index)
                    .map(|fragment| fragment.index == index)
                    .unwrap_or(false)
            })
    }
}

/// Public information about a stored secret.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretSummary {
    /// Identifier of the secret.
    pub id: SecretId,
    /// User-facing label.
    pub alias: String,
    /// Time the secret was first saved.
    pub created_at: UtcDateTime,
    /// Fragments needed to reconstruct.
    pub threshold: u8,
    /// Fragments the secret was split into.
    pub total: u8,
    /// Fragments whose key was permanently invalidated.
    pub damaged: BTreeSet<u8>,
    /// Whether the secret can still be reconstructed.
    pub recoverable: bool,
}

impl From<&SecretRecord> for SecretSummary {
    fn from(value: &SecretRecord) -> Self {
        Self {
            id: value.id,
            alias: value.alias.clone(),
            created_at: value.created_at,
            threshold: value.threshold,
            total: value.total,
            damaged: value.damaged.clone(),
            recoverable: value.is_recoverable(),
        }
    }
}
