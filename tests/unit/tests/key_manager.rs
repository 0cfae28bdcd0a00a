use anyhow::Result;
use seedlock_core::SecretId;
use seedlock_keystore::{
    select_key_alias, Error, KeyManager, KeyStore, KeyVariant, MemoryKeyStore,
};
use seedlock_session::{PresenceCheck, PresenceOutcome, SessionGate};
use seedlock_test_utils::MockPresence;
use std::{sync::Arc, time::Duration};

fn manager(
    presence: MockPresence,
) -> (KeyManager, Arc<MemoryKeyStore>, Arc<MockPresence>, SessionGate) {
    let store = Arc::new(MemoryKeyStore::new());
    let presence = Arc::new(presence);
    let session = SessionGate::new(Duration::from_secs(60));
    let manager = KeyManager::new(
        Arc::clone(&store) as Arc<dyn KeyStore>,
        session.clone(),
        Arc::clone(&presence) as Arc<dyn PresenceCheck>,
    );
    (manager, store, presence, session)
}

#[test]
fn key_alias_format() -> Result<()> {
    let id: SecretId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse()?;
    assert_eq!(
        "seed_lock_key_67e55044-10b1-426f-9247-bb680e5fe0c8_share_2",
        select_key_alias(&id, 2)
    );
    assert_eq!(select_key_alias(&id, 1), select_key_alias(&id, 1));
    assert_ne!(select_key_alias(&id, 1), select_key_alias(&id, 3));
    Ok(())
}

#[tokio::test]
async fn key_get_or_create_is_stable() -> Result<()> {
    let (manager, store, _, _) = manager(MockPresence::approve());
    let first = manager.get_or_create_key("alias").await?;
    let second = manager.get_or_create_key("alias").await?;
    assert_eq!(first.expose_secret(), second.expose_secret());
    assert_eq!(1, store.len());

    let other = manager.get_or_create_key("other").await?;
    assert_ne!(first.expose_secret(), other.expose_secret());
    Ok(())
}

#[tokio::test]
async fn key_delete_is_idempotent() -> Result<()> {
    let (manager, store, _, _) = manager(MockPresence::approve());
    manager.get_or_create_key("alias").await?;
    manager.delete_key("alias").await?;
    assert!(!store.contains("alias"));
    manager.delete_key("alias").await?;
    manager.delete_key("never-created").await?;
    assert!(matches!(
        manager.get_key("alias").await,
        Err(Error::KeyNotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn key_variant_follows_session() -> Result<()> {
    let (manager, _, presence, session) = manager(MockPresence::approve());
    assert_eq!(KeyVariant::PresenceGated, manager.current_variant());

    let key = manager.current_key("alias").await?;
    assert_eq!(1, presence.calls());
    assert!(session.is_authenticated());
    assert_eq!(KeyVariant::Standing, manager.current_variant());

    // Standing access does not prompt again.
    let again = manager.current_key("alias").await?;
    assert_eq!(1, presence.calls());
    assert_eq!(key.expose_secret(), again.expose_secret());

    session.end_session();
    assert_eq!(KeyVariant::PresenceGated, manager.current_variant());
    manager.current_key("alias").await?;
    assert_eq!(2, presence.calls());
    Ok(())
}

#[tokio::test]
async fn key_standing_requires_session() -> Result<()> {
    let (manager, store, presence, _) = manager(MockPresence::approve());
    assert!(matches!(
        manager.standing_key("alias").await,
        Err(Error::Session(seedlock_session::Error::SessionExpired))
    ));
    assert_eq!(0, presence.calls());
    assert!(store.is_empty());

    manager.presence_gated_key("alias").await?;
    manager.standing_key("alias").await?;
    Ok(())
}

#[tokio::test]
async fn key_presence_denied() -> Result<()> {
    let (manager, store, presence, session) =
        manager(MockPresence::deny("cancelled"));
    match manager.current_key("alias").await {
        Err(Error::Session(seedlock_session::Error::PresenceDenied(reason))) => {
            assert_eq!("cancelled", reason);
        }
        other => panic!("expected presence denied, got {:?}", other),
    }
    assert_eq!(1, presence.calls());
    assert!(!session.is_authenticated());
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn key_ensure_access_prompts_once() -> Result<()> {
    let (manager, _, presence, _) = manager(MockPresence::scripted(
        [
            PresenceOutcome::Failure("first attempt".to_owned()),
            PresenceOutcome::Success,
        ],
        PresenceOutcome::Failure("unexpected".to_owned()),
    ));
    assert!(manager.ensure_access("unlock").await.is_err());
    assert_eq!(KeyVariant::PresenceGated, manager.ensure_access("unlock").await?);
    assert_eq!(KeyVariant::Standing, manager.ensure_access("unlock").await?);
    assert_eq!(2, presence.calls());
    Ok(())
}

#[tokio::test]
async fn key_concurrent_prompts_are_serialized() -> Result<()> {
    let (manager, _, presence, _) = manager(MockPresence::approve());
    let aliases: Vec<String> = (1..=3).map(|i| format!("alias_{}", i)).collect();
    let results = futures::future::join_all(
        aliases.iter().map(|alias| manager.current_key(alias)),
    )
    .await;
    for result in results {
        result?;
    }
    assert_eq!(1, presence.calls());
    Ok(())
}

#[tokio::test]
async fn key_existing_never_creates() -> Result<()> {
    let (manager, store, _, _) = manager(MockPresence::approve());
    assert!(matches!(
        manager.existing_key("alias").await,
        Err(Error::KeyNotFound(_))
    ));
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn key_invalidated_is_reported() -> Result<()> {
    let (manager, store, _, _) = manager(MockPresence::approve());
    manager.current_key("alias").await?;
    assert!(store.invalidate("alias"));
    assert!(matches!(
        manager.existing_key("alias").await,
        Err(Error::KeyInvalidated(_))
    ));
    assert!(matches!(
        manager.get_or_create_key("alias").await,
        Err(Error::KeyInvalidated(_))
    ));

    // Deleting clears the invalidated slot.
    manager.delete_key("alias").await?;
    manager.get_or_create_key("alias").await?;
    Ok(())
}
