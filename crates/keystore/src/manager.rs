//! Key lifecycle and key variant selection.
use crate::{Error, KeyHandle, KeyStore, Result};
use seedlock_core::{
    constants::{KEY_ALIAS_PREFIX, KEY_ALIAS_SHARE},
    SecretId,
};
use seedlock_session::{PresenceCheck, PresenceOutcome, SessionGate};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Alias of the key for a fragment of a secret.
///
/// Stable across restarts so the key for a stored fragment
/// can always be located.
pub fn select_key_alias(secret_id: &SecretId, index: u8) -> String {
    format!("{}{}{}{}", KEY_ALIAS_PREFIX, secret_id, KEY_ALIAS_SHARE, index)
}

/// Variant of key access matching the current trust level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVariant {
    /// Usable at any time while a session is authenticated.
    Standing,
    /// Usable only after a successful presence check.
    PresenceGated,
}

/// Creates, fetches and deletes fragment keys.
///
/// Access to key material goes through the variant selected by the
/// session gate: [KeyVariant::Standing] while the session is
/// authenticated, [KeyVariant::PresenceGated] otherwise.
pub struct KeyManager {
    store: Arc<dyn KeyStore>,
    session: SessionGate,
    presence: Arc<dyn PresenceCheck>,
    prompt: Mutex<()>,
}

impl KeyManager {
    /// Create a key manager.
    pub fn new(
        store: Arc<dyn KeyStore>,
        session: SessionGate,
        presence: Arc<dyn PresenceCheck>,
    ) -> Self {
        if !store.device_backed() {
            tracing::warn!(
                "keys::store is not device backed, keys live in memory"
            );
        }
        Self {
            store,
            session,
            presence,
            prompt: Mutex::new(()),
        }
    }

    /// Session gate used to select the key variant.
    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    /// Fetch a key, creating it when missing, without consulting
    /// the session.
    pub async fn get_or_create_key(&self, alias: &str) -> Result<KeyHandle> {
        let store = Arc::clone(&self.store);
        let alias = alias.to_owned();
        tokio::task::spawn_blocking(move || store.get_or_create(&alias))
            .await?
    }

    /// Fetch an existing key without consulting the session.
    pub async fn get_key(&self, alias: &str) -> Result<KeyHandle> {
        let store = Arc::clone(&self.store);
        let name = alias.to_owned();
        tokio::task::spawn_blocking(move || store.get(&name))
            .await??
            .ok_or_else(|| Error::KeyNotFound(alias.to_owned()))
    }

    /// Delete a key.
    ///
    /// Deleting a missing key is not an error.
    pub async fn delete_key(&self, alias: &str) -> Result<()> {
        let store = Arc::clone(&self.store);
        let name = alias.to_owned();
        tokio::task::spawn_blocking(move || store.delete(&name)).await??;
        tracing::debug!(alias = %alias, "keys::delete");
        Ok(())
    }

    /// Key variant for the current session state.
    pub fn current_variant(&self) -> KeyVariant {
        if self.session.is_authenticated() {
            KeyVariant::Standing
        } else {
            KeyVariant::PresenceGated
        }
    }

    /// Make sure keys can be used, running the presence check
    /// only when the session is not authenticated.
    ///
    /// A successful check authenticates the session; otherwise
    /// the session is refreshed as a qualifying interaction.
    pub async fn ensure_access(&self, reason: &str) -> Result<KeyVariant> {
        if self.session.refresh().is_ok() {
            return Ok(KeyVariant::Standing);
        }
        self.confirm_presence(reason).await?;
        Ok(KeyVariant::PresenceGated)
    }

    /// Fetch or create a key using the standing variant.
    ///
    /// Requires an authenticated session.
    pub async fn standing_key(&self, alias: &str) -> Result<KeyHandle> {
        self.session.refresh()?;
        self.get_or_create_key(alias).await
    }

    /// Fetch or create a key using the presence-gated variant.
    ///
    /// Runs the presence check first and authenticates the
    /// session when it succeeds.
    pub async fn presence_gated_key(&self, alias: &str) -> Result<KeyHandle> {
        self.confirm_presence(alias).await?;
        self.get_or_create_key(alias).await
    }

    /// Fetch or create a key through the variant matching
    /// the session state.
    pub async fn current_key(&self, alias: &str) -> Result<KeyHandle> {
        match self.current_variant() {
            KeyVariant::Standing => self.standing_key(alias).await,
            KeyVariant::PresenceGated => self.presence_gated_key(alias).await,
        }
    }

    /// Fetch an existing key through the variant matching
    /// the session state.
    ///
    /// Used for decryption where creating a fresh key would only
    /// hide that the original key is gone.
    pub async fn existing_key(&self, alias: &str) -> Result<KeyHandle> {
        match self.current_variant() {
            KeyVariant::Standing => self.session.refresh()?,
            KeyVariant::PresenceGated => self.confirm_presence(alias).await?,
        }
        self.get_key(alias).await
    }

    async fn confirm_presence(&self, reason: &str) -> Result<()> {
        // One prompt at a time, concurrent callers reuse the session
        // opened by the first successful check.
        let _guard = self.prompt.lock().await;
        if self.session.refresh().is_ok() {
            return Ok(());
        }

        match self.presence.verify(reason).await {
            PresenceOutcome::Success => {
                self.session.authenticate();
                tracing::debug!("keys::presence_confirmed");
                Ok(())
            }
            PresenceOutcome::Failure(message) => {
                tracing::warn!(reason = %message, "keys::presence_denied");
                Err(seedlock_session::Error::PresenceDenied(message).into())
            }
        }
    }
}
