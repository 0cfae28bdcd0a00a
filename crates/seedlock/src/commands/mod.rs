use crate::{
    config::{records_dir, Config, KeyStoreKind},
    helpers::{messages::warn, presence::platform_presence},
    Result,
};
use seedlock_keystore::{KeyManager, KeyStore, MemoryKeyStore};
use seedlock_platform_authenticator::{keyring_keys, KeyringKeyStore};
use seedlock_session::SessionGate;
use seedlock_vault::{FileRecordStore, SecretVault};
use std::{path::Path, sync::Arc};

pub mod config;
pub mod secret;

/// Open the vault for a data directory.
pub fn open_vault(
    data_dir: impl AsRef<Path>,
    config: &Config,
) -> Result<SecretVault> {
    let options = config.share_options()?;

    let keys: Arc<dyn KeyStore> = match config.key_store {
        KeyStoreKind::Platform if keyring_keys::supported() => {
            Arc::new(KeyringKeyStore::new())
        }
        KeyStoreKind::Platform => {
            warn("platform keyring is not supported, keys are kept in memory");
            Arc::new(MemoryKeyStore::new())
        }
        KeyStoreKind::Memory => {
            warn("keys are kept in memory and lost when the process exits");
            Arc::new(MemoryKeyStore::new())
        }
    };

    let session = SessionGate::new(config.session_timeout());
    let manager = KeyManager::new(keys, session, platform_presence());
    let store = Arc::new(FileRecordStore::new(records_dir(data_dir)));
    Ok(SecretVault::new(store, manager, options))
}
