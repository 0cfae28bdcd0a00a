//! Durable storage for secret records.
use crate::SecretRecord;
use async_trait::async_trait;
use parking_lot::RwLock;
use seedlock_core::{constants::RECORD_EXT, SecretId};
use std::{
    collections::{BTreeSet, HashMap},
    io::{Error, ErrorKind, Result},
    path::{Path, PathBuf},
};

/// Storage for secret records.
///
/// Every operation may fail with an I/O error which the
/// vault surfaces unchanged.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write a record, replacing any record with the same identifier.
    ///
    /// Implementations must make the write atomic so a reader
    /// sees either the previous record or the new one.
    async fn put(&self, record: &SecretRecord) -> Result<()>;

    /// Read a record.
    async fn get(&self, id: &SecretId) -> Result<Option<SecretRecord>>;

    /// Delete a record; deleting a missing record is not an error.
    async fn delete(&self, id: &SecretId) -> Result<()>;

    /// Identifiers of all stored records.
    async fn list_ids(&self) -> Result<BTreeSet<SecretId>>;
}

/// Record store held in memory.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<SecretId, SecretRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: &SecretRecord) -> Result<()> {
        self.records.write().insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: &SecretId) -> Result<Option<SecretRecord>> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn delete(&self, id: &SecretId) -> Result<()> {
        self.records.write().remove(id);
        Ok(())
    }

    async fn list_ids(&self) -> Result<BTreeSet<SecretId>> {
        Ok(self.records.read().keys().copied().collect())
    }
}

/// Record store writing one JSON file per record.
///
/// Files are written to a temporary path and renamed into
/// place so a partially written record is never read.
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    /// Create a store for a directory.
    ///
    /// The directory is created on the first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory containing the record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the file for a record.
    pub fn record_path(&self, id: &SecretId) -> PathBuf {
        let mut path = self.dir.join(id.to_string());
        path.set_extension(RECORD_EXT);
        path
    }

    fn temp_path(&self, id: &SecretId) -> PathBuf {
        self.dir.join(format!(".{}.{}.tmp", id, RECORD_EXT))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn put(&self, record: &SecretRecord) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let buffer = serde_json::to_vec_pretty(record)?;
        let temp = self.temp_path(&record.id);
        tokio::fs::write(&temp, &buffer).await?;
        if let Err(e) =
            tokio::fs::rename(&temp, self.record_path(&record.id)).await
        {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e);
        }
        tracing::debug!(
            id = %record.id,
            length = buffer.len(),
            "record_store::put",
        );
        Ok(())
    }

    async fn get(&self, id: &SecretId) -> Result<Option<SecretRecord>> {
        let buffer = match tokio::fs::read(self.record_path(id)).await {
            Ok(buffer) => buffer,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let record: SecretRecord = serde_json::from_slice(&buffer)?;
        if record.id != *id {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("record file for {} holds secret {}", id, record.id),
            ));
        }
        Ok(Some(record))
    }

    async fn delete(&self, id: &SecretId) -> Result<()> {
        match tokio::fs::remove_file(self.record_path(id)).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn list_ids(&self) -> Result<BTreeSet<SecretId>> {
        let mut ids = BTreeSet::new();
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(e),
        };
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if let (Some(extension), Some(file_stem)) =
                (path.extension(), path.file_stem())
            {
                if extension == RECORD_EXT {
                    if let Ok(id) = file_stem.to_string_lossy().parse() {
                        ids.insert(id);
                    }
                }
            }
        }
        Ok(ids)
    }
}
