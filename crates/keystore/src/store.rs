use crate::{Error, KeyHandle, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Store for named symmetric keys.
///
/// Calls may block on the platform key store so callers
/// must not hold locks across them.
pub trait KeyStore: Send + Sync {
    /// Fetch the key for an alias, generating and storing
    /// a new key when none exists.
    fn get_or_create(&self, alias: &str) -> Result<KeyHandle>;

    /// Fetch the key for an alias if it exists.
    fn get(&self, alias: &str) -> Result<Option<KeyHandle>>;

    /// Delete the key for an alias.
    ///
    /// Deleting a missing alias is not an error.
    fn delete(&self, alias: &str) -> Result<()>;

    /// Whether keys are kept in device-backed storage.
    fn device_backed(&self) -> bool;
}

enum Slot {
    Active(KeyHandle),
    Invalidated,
}

/// Process-local key store.
///
/// Keys do not survive a restart of the process.
#[derive(Default)]
pub struct MemoryKeyStore {
    keys: RwLock<HashMap<String, Slot>>,
}

impl MemoryKeyStore {
    /// Create an empty key store.
    pub fn new() -> Self {
        Default::default()
    }

    /// Mark a key as permanently invalidated, as happens to
    /// presence-bound platform keys when enrollment changes.
    pub fn invalidate(&self, alias: &str) -> bool {
        let mut keys = self.keys.write();
        match keys.get_mut(alias) {
            Some(slot) => {
                *slot = Slot::Invalidated;
                true
            }
            None => false,
        }
    }

    /// Whether a key exists for the alias, invalidated or not.
    pub fn contains(&self, alias: &str) -> bool {
        self.keys.read().contains_key(alias)
    }

    /// Number of keys in the store.
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

impl KeyStore for MemoryKeyStore {
    fn get_or_create(&self, alias: &str) -> Result<KeyHandle> {
        let mut keys = self.keys.write();
        match keys.get(alias) {
            Some(Slot::Active(key)) => Ok(key.clone()),
            Some(Slot::Invalidated) => {
                Err(Error::KeyInvalidated(alias.to_owned()))
            }
            None => {
                let key = KeyHandle::generate(alias);
                keys.insert(alias.to_owned(), Slot::Active(key.clone()));
                Ok(key)
            }
        }
    }

    fn get(&self, alias: &str) -> Result<Option<KeyHandle>> {
        let keys = self.keys.read();
        match keys.get(alias) {
            Some(Slot::Active(key)) => Ok(Some(key.clone())),
            Some(Slot::Invalidated) => {
                Err(Error::KeyInvalidated(alias.to_owned()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, alias: &str) -> Result<()> {
        self.keys.write().remove(alias);
        Ok(())
    }

    fn device_backed(&self) -> bool {
        false
    }
}
