use crate::{
    EncryptedFragment, Error, RecordStore, Result, SecretRecord,
    SecretSummary,
};
use futures::future::join_all;
use parking_lot::Mutex;
use seedlock_core::{
    constants::CHECKSUM_SIZE, crypto::AeadPack, secret_checksum, SecretBytes,
    SecretId, UtcDateTime,
};
use seedlock_keystore::{envelope, select_key_alias, KeyManager};
use seedlock_sharing::{Fragment, ShareOptions};
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use zeroize::Zeroizing;

/// Saves, loads and deletes secrets split into encrypted fragments.
///
/// Writes to the same secret are serialized; operations on
/// different secrets run independently.
pub struct SecretVault {
    store: Arc<dyn RecordStore>,
    keys: KeyManager,
    options: ShareOptions,
    locks: Mutex<HashMap<SecretId, Arc<AsyncMutex<()>>>>,
}

impl SecretVault {
    /// Create a vault.
    pub fn new(
        store: Arc<dyn RecordStore>,
        keys: KeyManager,
        options: ShareOptions,
    ) -> Self {
        Self {
            store,
            keys,
            options,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Key manager for the fragment keys.
    pub fn keys(&self) -> &KeyManager {
        &self.keys
    }

    /// Options used to split new secrets.
    pub fn options(&self) -> &ShareOptions {
        &self.options
    }

    /// Split, encrypt and store a new secret.
    ///
    /// Either the complete record is written or nothing is;
    /// keys created for an aborted save are deleted again.
    pub async fn save(
        &self,
        secret: &SecretBytes,
        alias: &str,
    ) -> Result<SecretId> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }

        let id = SecretId::new_v4();
        let _guard = self.lock(&id).await;
        self.keys.ensure_access("Save secret").await?;

        let result = match self
            .seal(id, alias.to_owned(), UtcDateTime::now(), secret, self.options)
            .await
        {
            Ok(record) => self.store.put(&record).await.map_err(Error::from),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::error!(id = %id, error = %e, "vault::save_aborted");
            self.delete_keys(&id, self.options.total()).await;
            return Err(e);
        }

        tracing::info!(
            id = %id,
            threshold = %self.options.threshold(),
            total = %self.options.total(),
            "vault::save",
        );
        Ok(id)
    }

    /// Replace the secret stored under an identifier.
    ///
    /// The existing record stays intact unless the replacement
    /// is fully encrypted and written. Keys of damaged fragments
    /// are replaced with fresh keys.
    pub async fn update(&self, id: &SecretId, secret: &SecretBytes) -> Result<()> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }

        let _guard = self.lock(id).await;
        let current = self.store.get(id).await?.ok_or(Error::NotFound(*id))?;
        let options = ShareOptions::new(current.threshold, current.total)?;
        self.keys.ensure_access("Update secret").await?;

        for index in &current.damaged {
            self.keys.delete_key(&select_key_alias(id, *index)).await?;
        }

        let record = self
            .seal(*id, current.alias.clone(), current.created_at, secret, options)
            .await?;
        self.store.put(&record).await?;

        tracing::info!(id = %id, "vault::update");
        Ok(())
    }

    /// Decrypt the fragments of a secret and reconstruct it.
    ///
    /// Fragments that fail to decrypt are skipped as long as enough
    /// remain; fragments whose key is permanently gone are marked
    /// as damaged in the record.
    pub async fn load(&self, id: &SecretId) -> Result<SecretBytes> {
        let _guard = self.lock(id).await;
        let mut record =
            self.store.get(id).await?.ok_or(Error::NotFound(*id))?;
        if !record.is_complete() {
            tracing::error!(
                id = %id,
                fragments = %record.fragments.len(),
                total = %record.total,
                "vault::incomplete_record",
            );
            return Err(Error::IncompleteRecord(*id));
        }
        self.keys.ensure_access("Unlock secret").await?;

        let pending: Vec<&EncryptedFragment> = record
            .fragments
            .values()
            .filter(|fragment| !record.damaged.contains(&fragment.index))
            .collect();
        let results = join_all(
            pending.into_iter().map(|fragment| self.open(id, fragment)),
        )
        .await;

        let mut fragments = Vec::with_capacity(results.len());
        let mut damaged = Vec::new();
        for result in results {
            match result {
                Ok(fragment) => fragments.push(fragment),
                Err(e) if e.is_session_error() => return Err(e),
                Err(Error::KeyUnavailable { index }) => {
                    tracing::warn!(
                        id = %id,
                        index = %index,
                        "vault::fragment_key_unavailable",
                    );
                    damaged.push(index);
                }
                Err(e) => {
                    tracing::warn!(
                        id = %id,
                        error = %e,
                        "vault::fragment_skipped",
                    );
                }
            }
        }

        if !damaged.is_empty() {
            record.damaged.extend(damaged);
            if let Err(e) = self.store.put(&record).await {
                tracing::warn!(
                    id = %id,
                    error = %e,
                    "vault::damage_not_recorded",
                );
            }
        }

        let required = record.threshold;
        if fragments.len() < required as usize {
            tracing::error!(
                id = %id,
                decrypted = %fragments.len(),
                required = %required,
                recoverable = %record.is_recoverable(),
                "vault::insufficient_fragments",
            );
            return Err(Error::InsufficientFragments {
                decrypted: fragments.len(),
                required,
            });
        }

        let payload = seedlock_sharing::reconstruct(&fragments, required)?;
        let secret = unseal(id, &payload)?;

        tracing::debug!(
            id = %id,
            decrypted = %fragments.len(),
            "vault::load",
        );
        Ok(secret)
    }

    /// Delete a secret and all of its fragment keys.
    ///
    /// The record is removed first; every key deletion is attempted
    /// and the aliases of keys that could not be deleted are reported.
    pub async fn delete(&self, id: &SecretId) -> Result<()> {
        let _guard = self.lock(id).await;
        let record = self.store.get(id).await?.ok_or(Error::NotFound(*id))?;
        self.store.delete(id).await?;

        let aliases = self.delete_keys(id, record.total).await;
        if !aliases.is_empty() {
            return Err(Error::KeyCleanup { aliases });
        }

        tracing::info!(id = %id, "vault::delete");
        Ok(())
    }

    /// Summaries of all stored secrets, newest first.
    pub async fn list(&self) -> Result<Vec<SecretSummary>> {
        let mut summaries = Vec::new();
        for id in self.store.list_ids().await? {
            if let Some(record) = self.store.get(&id).await? {
                summaries.push(SecretSummary::from(&record));
            }
        }
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    /// User-facing label of a secret.
    pub async fn alias(&self, id: &SecretId) -> Result<String> {
        Ok(self.record(id).await?.alias)
    }

    /// Stored record of a secret.
    pub async fn record(&self, id: &SecretId) -> Result<SecretRecord> {
        self.store.get(id).await?.ok_or(Error::NotFound(*id))
    }

    async fn lock(&self, id: &SecretId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(*id).or_default())
        };
        lock.lock_owned().await
    }

    async fn seal(
        &self,
        id: SecretId,
        alias: String,
        created_at: UtcDateTime,
        secret: &SecretBytes,
        options: ShareOptions,
    ) -> Result<SecretRecord> {
        let mut payload =
            Zeroizing::new(Vec::with_capacity(secret.len() + CHECKSUM_SIZE));
        payload.extend_from_slice(secret.expose());
        payload.extend_from_slice(&secret_checksum(&id, secret));

        let fragments = options.split(&payload).map_err(|e| match e {
            seedlock_sharing::Error::InvalidParameters { .. }
            | seedlock_sharing::Error::EmptySecret => Error::from(e),
            e => Error::SplitFailure(e),
        })?;

        let results = join_all(
            fragments.iter().map(|fragment| self.seal_fragment(&id, fragment)),
        )
        .await;
        drop(fragments);

        let mut sealed = BTreeMap::new();
        for result in results {
            let fragment = result?;
            sealed.insert(fragment.index, fragment);
        }

        Ok(SecretRecord {
            id,
            alias,
            created_at,
            threshold: options.threshold(),
            total: options.total(),
            fragments: sealed,
            damaged: Default::default(),
        })
    }

    async fn seal_fragment(
        &self,
        id: &SecretId,
        fragment: &Fragment,
    ) -> Result<EncryptedFragment> {
        let index = fragment.index();
        let key_alias = select_key_alias(id, index);
        match self.encrypt(&key_alias, fragment.value()).await {
            Ok(aead) => {
                tracing::debug!(id = %id, index = %index, "vault::sealed");
                Ok(EncryptedFragment {
                    index,
                    key_alias,
                    aead,
                })
            }
            Err(seedlock_keystore::Error::Session(e)) => Err(e.into()),
            Err(source) => Err(Error::EncryptionFailure { index, source }),
        }
    }

    async fn encrypt(
        &self,
        alias: &str,
        value: &[u8],
    ) -> seedlock_keystore::Result<AeadPack> {
        let key = self.keys.current_key(alias).await?;
        envelope::encrypt(&key, value)
    }

    async fn open(
        &self,
        id: &SecretId,
        encrypted: &EncryptedFragment,
    ) -> Result<Fragment> {
        use seedlock_keystore::Error as KeyError;

        let index = encrypted.index;
        if encrypted.key_alias != select_key_alias(id, index) {
            return Err(Error::AuthenticationFailure { index });
        }

        let key = match self.keys.existing_key(&encrypted.key_alias).await {
            Ok(key) => key,
            Err(
                KeyError::KeyInvalidated(_)
                | KeyError::KeyNotFound(_)
                | KeyError::KeyLength { .. },
            ) => return Err(Error::KeyUnavailable { index }),
            Err(e) => return Err(e.into()),
        };

        let value = envelope::decrypt(&key, &encrypted.aead)
            .map_err(|_| Error::AuthenticationFailure { index })?;
        Ok(Fragment::new(index, value.to_vec()))
    }

    async fn delete_keys(&self, id: &SecretId, total: u8) -> Vec<String> {
        let aliases: Vec<String> =
            (1..=total).map(|index| select_key_alias(id, index)).collect();
        let results =
            join_all(aliases.iter().map(|alias| self.keys.delete_key(alias)))
                .await;

        let mut failed = Vec::new();
        for (alias, result) in aliases.into_iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(
                    alias = %alias,
                    error = %e,
                    "vault::key_cleanup_failed",
                );
                failed.push(alias);
            }
        }
        failed
    }
}

/// Split a reconstructed payload into the secret and its checksum
/// and verify the checksum.
fn unseal(id: &SecretId, payload: &SecretBytes) -> Result<SecretBytes> {
    let bytes = payload.expose();
    let length = match bytes.len().checked_sub(CHECKSUM_SIZE) {
        Some(length) if length > 0 => length,
        _ => {
            tracing::error!(id = %id, "vault::integrity_check_failed");
            return Err(Error::IntegrityCheckFailed(*id));
        }
    };
    let (value, checksum) = bytes.split_at(length);
    let secret = SecretBytes::from(value);
    if secret_checksum(id, &secret).as_slice() != checksum {
        tracing::error!(id = %id, "vault::integrity_check_failed");
        return Err(Error::IntegrityCheckFailed(*id));
    }
    Ok(secret)
}
