//! Settings loaded from the config file in the data directory.
use crate::Result;
use seedlock_core::constants::{
    APP_DIR, CONFIG_FILE, RECORDS_DIR, SESSION_TIMEOUT, THRESHOLD,
    TOTAL_SHARES,
};
use seedlock_sharing::ShareOptions;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Storage for fragment keys.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyStoreKind {
    /// Platform keyring.
    #[default]
    Platform,
    /// Process memory, keys are lost on exit.
    Memory,
}

/// Command line settings.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Fragments needed to reconstruct a secret.
    pub threshold: u8,
    /// Fragments a secret is split into.
    pub total: u8,
    /// Seconds of inactivity before the session ends.
    pub session_timeout_secs: u64,
    /// Storage for fragment keys.
    pub key_store: KeyStoreKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            total: TOTAL_SHARES,
            session_timeout_secs: SESSION_TIMEOUT.as_secs(),
            key_store: KeyStoreKind::default(),
        }
    }
}

impl Config {
    /// Path to the config file in a data directory.
    pub fn file(data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(CONFIG_FILE)
    }

    /// Load the config file, using defaults when it does not exist.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Default::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the config file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path.as_ref(), toml::to_string_pretty(self)?)
            .await?;
        Ok(())
    }

    /// Validated share options.
    pub fn share_options(&self) -> Result<ShareOptions> {
        Ok(ShareOptions::new(self.threshold, self.total)?)
    }

    /// Session inactivity timeout.
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }
}

/// Default data directory for the platform.
pub fn default_data_dir() -> Result<PathBuf> {
    use etcetera::BaseStrategy;
    let strategy = etcetera::choose_base_strategy()?;
    Ok(strategy.data_dir().join(APP_DIR))
}

/// Directory holding the secret records.
pub fn records_dir(data_dir: impl AsRef<Path>) -> PathBuf {
    data_dir.as_ref().join(RECORDS_DIR)
}
