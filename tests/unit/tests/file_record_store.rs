use anyhow::Result;
use seedlock_core::{SecretBytes, SecretId};
use seedlock_test_utils::{setup, FaultyKeyStore, MockPresence, TestVault};
use seedlock_vault::{FileRecordStore, RecordStore, SecretRecord};
use std::sync::Arc;

#[tokio::test]
async fn file_store_round_trip() -> Result<()> {
    let dir = setup()?;
    let test = TestVault::in_dir(dir.path());
    let id = test
        .vault
        .save(&SecretBytes::from("correct horse battery staff"), "wallet")
        .await?;

    let store = FileRecordStore::new(dir.path());
    let path = store.record_path(&id);
    assert!(path.exists());
    assert_eq!(Some("json"), path.extension().and_then(|e| e.to_str()));

    // Stored as JSON with base64 ciphertext and nonce per fragment.
    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(id.to_string(), value["id"]);
    assert_eq!("wallet", value["alias"]);
    let fragment = &value["fragments"]["1"];
    assert!(fragment["ciphertext"].is_string());
    assert!(fragment["nonce"].is_string());
    assert!(fragment["keyAlias"]
        .as_str()
        .map(|alias| alias.ends_with("_share_1"))
        .unwrap_or(false));

    let record = store.get(&id).await?;
    assert_eq!(Some(test.vault.record(&id).await?), record);
    Ok(())
}

#[tokio::test]
async fn file_store_survives_reopen() -> Result<()> {
    let dir = setup()?;
    let keys = Arc::new(FaultyKeyStore::new());

    let id = {
        let test = TestVault::builder(Arc::new(FileRecordStore::new(dir.path())))
            .keys(Arc::clone(&keys))
            .build(Arc::new(MockPresence::approve()), Default::default());
        test.vault.save(&SecretBytes::from("persisted"), "disk").await?
    };

    let test = TestVault::builder(Arc::new(FileRecordStore::new(dir.path())))
        .keys(keys)
        .build(Arc::new(MockPresence::approve()), Default::default());
    assert_eq!(b"persisted", test.vault.load(&id).await?.expose());
    assert_eq!(1, test.vault.list().await?.len());
    Ok(())
}

#[tokio::test]
async fn file_store_missing_entries() -> Result<()> {
    let dir = setup()?;
    let store = FileRecordStore::new(dir.path().join("not-created"));
    let id = SecretId::new_v4();
    assert!(store.get(&id).await?.is_none());
    assert!(store.list_ids().await?.is_empty());
    store.delete(&id).await?;
    Ok(())
}

#[tokio::test]
async fn file_store_ignores_other_files() -> Result<()> {
    let dir = setup()?;
    let test = TestVault::in_dir(dir.path());
    let id = test.vault.save(&SecretBytes::from("value"), "one").await?;

    std::fs::write(dir.path().join("notes.txt"), b"hello")?;
    std::fs::write(dir.path().join("not-a-uuid.json"), b"{}")?;
    std::fs::write(dir.path().join(format!(".{}.json.tmp", id)), b"{")?;

    let store = FileRecordStore::new(dir.path());
    let ids = store.list_ids().await?;
    assert_eq!(1, ids.len());
    assert!(ids.contains(&id));
    Ok(())
}

#[tokio::test]
async fn file_store_rejects_mismatched_id() -> Result<()> {
    let dir = setup()?;
    let test = TestVault::in_dir(dir.path());
    let id = test.vault.save(&SecretBytes::from("value"), "one").await?;

    let store = FileRecordStore::new(dir.path());
    let other = SecretId::new_v4();
    std::fs::copy(store.record_path(&id), store.record_path(&other))?;
    let result = store.get(&other).await;
    assert_eq!(
        Some(std::io::ErrorKind::InvalidData),
        result.err().map(|e| e.kind())
    );
    Ok(())
}

#[tokio::test]
async fn file_store_corrupt_record_is_io_error() -> Result<()> {
    let dir = setup()?;
    let store = FileRecordStore::new(dir.path());
    let id = SecretId::new_v4();
    std::fs::write(store.record_path(&id), b"not json")?;
    assert!(store.get(&id).await.is_err());

    let test = TestVault::builder(Arc::new(FileRecordStore::new(dir.path())))
        .build(Arc::new(MockPresence::approve()), Default::default());
    assert!(matches!(
        test.vault.load(&id).await,
        Err(seedlock_vault::Error::StoreIo(_))
    ));
    Ok(())
}

#[test]
fn record_damaged_set_is_optional() -> Result<()> {
    let json = serde_json::json!({
        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "alias": "wallet",
        "createdAt": "2024-05-01T10:00:00Z",
        "threshold": 2,
        "total": 3,
        "fragments": {},
    });
    let record: SecretRecord = serde_json::from_value(json)?;
    assert!(record.damaged.is_empty());
    assert!(!record.is_complete());
    assert!(!record.is_recoverable());

    let encoded = serde_json::to_value(&record)?;
    assert!(encoded.get("damaged").is_none());
    Ok(())
}
