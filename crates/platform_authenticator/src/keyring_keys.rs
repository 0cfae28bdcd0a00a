//! Fragment keys stored in the platform keyring.
//!
//! Key material is hex encoded and saved as the keyring password
//! for an account named by the key alias.
use crate::Error;
use seedlock_core::constants::SERVICE_NAME;
use seedlock_keystore::{KeyHandle, KeyStore};
use zeroize::Zeroizing;

// MacOS implementation uses the security framework
// directly instead of the `keyring` crate.
#[cfg(target_os = "macos")]
mod macos {
    use crate::{Error, Result};
    use security_framework::passwords::{
        delete_generic_password, get_generic_password, set_generic_password,
    };
    use zeroize::Zeroizing;

    const ERR_SEC_ITEM_NOT_FOUND: i32 = -25300;

    /// Find the key material for an alias.
    pub fn find_key_material(
        service: &str,
        alias: &str,
    ) -> Result<Zeroizing<String>> {
        match get_generic_password(service, alias) {
            Ok(bytes) => {
                let bytes = Zeroizing::new(bytes);
                Ok(Zeroizing::new(std::str::from_utf8(&bytes)?.to_owned()))
            }
            Err(e) => {
                if e.code() == ERR_SEC_ITEM_NOT_FOUND {
                    Err(Error::NoKeyringEntry)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Save key material for an alias.
    pub fn save_key_material(
        service: &str,
        alias: &str,
        material: &str,
    ) -> Result<()> {
        set_generic_password(service, alias, material.as_bytes())?;
        Ok(())
    }

    /// Delete the key material for an alias.
    pub fn delete_key_material(service: &str, alias: &str) -> Result<()> {
        match delete_generic_password(service, alias) {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.code() == ERR_SEC_ITEM_NOT_FOUND {
                    Err(Error::NoKeyringEntry)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Whether platform keyring storage is supported.
    pub fn supported() -> bool {
        true
    }
}

// Other platforms use the `keyring` crate.
#[cfg(all(not(target_os = "macos"), not(target_os = "android")))]
mod platform_keyring {
    use crate::{Error, Result};
    use keyring::{Entry, Error as KeyringError};
    use zeroize::Zeroizing;

    /// Find the key material for an alias.
    pub fn find_key_material(
        service: &str,
        alias: &str,
    ) -> Result<Zeroizing<String>> {
        let entry = Entry::new(service, alias)?;
        match entry.get_password() {
            Ok(material) => Ok(Zeroizing::new(material)),
            Err(KeyringError::NoEntry) => Err(Error::NoKeyringEntry),
            Err(e) => Err(e.into()),
        }
    }

    /// Save key material for an alias.
    pub fn save_key_material(
        service: &str,
        alias: &str,
        material: &str,
    ) -> Result<()> {
        let entry = Entry::new(service, alias)?;
        entry.set_password(material)?;
        Ok(())
    }

    /// Delete the key material for an alias.
    pub fn delete_key_material(service: &str, alias: &str) -> Result<()> {
        let entry = Entry::new(service, alias)?;
        match entry.delete_credential() {
            Ok(_) => Ok(()),
            Err(KeyringError::NoEntry) => Err(Error::NoKeyringEntry),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether platform keyring storage is supported.
    pub fn supported() -> bool {
        true
    }
}

// Android is not currently supported.
#[cfg(target_os = "android")]
mod unsupported {
    use crate::{Error, Result};
    use zeroize::Zeroizing;

    /// Find the key material for an alias.
    pub fn find_key_material(
        _service: &str,
        _alias: &str,
    ) -> Result<Zeroizing<String>> {
        Err(Error::Unsupported)
    }

    /// Save key material for an alias.
    pub fn save_key_material(
        _service: &str,
        _alias: &str,
        _material: &str,
    ) -> Result<()> {
        Err(Error::Unsupported)
    }

    /// Delete the key material for an alias.
    pub fn delete_key_material(_service: &str, _alias: &str) -> Result<()> {
        Err(Error::Unsupported)
    }

    /// Whether platform keyring storage is supported.
    pub fn supported() -> bool {
        false
    }
}

#[cfg(target_os = "macos")]
pub use macos::*;

#[cfg(all(not(target_os = "macos"), not(target_os = "android")))]
pub use platform_keyring::*;

#[cfg(target_os = "android")]
pub use unsupported::*;

/// Key store backed by the platform keyring.
pub struct KeyringKeyStore {
    service: String,
}

impl KeyringKeyStore {
    /// Key store using the default service name.
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Key store using a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn save(&self, key: &KeyHandle) -> crate::Result<()> {
        let material = Zeroizing::new(hex::encode(key.expose_secret()));
        save_key_material(&self.service, key.alias(), &material)
    }
}

impl Default for KeyringKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for KeyringKeyStore {
    fn get_or_create(
        &self,
        alias: &str,
    ) -> seedlock_keystore::Result<KeyHandle> {
        if let Some(key) = self.get(alias)? {
            return Ok(key);
        }
        let key = KeyHandle::generate(alias);
        self.save(&key)?;
        tracing::debug!(alias = %alias, "keyring::create");
        Ok(key)
    }

    fn get(&self, alias: &str) -> seedlock_keystore::Result<Option<KeyHandle>> {
        match find_key_material(&self.service, alias) {
            Ok(material) => {
                // Unreadable material cannot be repaired, the key is gone.
                let bytes = hex::decode(material.as_str())
                    .map(Zeroizing::new)
                    .map_err(|_| {
                        seedlock_keystore::Error::KeyInvalidated(
                            alias.to_owned(),
                        )
                    })?;
                let key =
                    KeyHandle::from_slice(alias, &bytes).map_err(|_| {
                        seedlock_keystore::Error::KeyInvalidated(
                            alias.to_owned(),
                        )
                    })?;
                Ok(Some(key))
            }
            Err(Error::NoKeyringEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, alias: &str) -> seedlock_keystore::Result<()> {
        match delete_key_material(&self.service, alias) {
            Ok(_) | Err(Error::NoKeyringEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn device_backed(&self) -> bool {
        supported()
    }
}
