use anyhow::Result;
use seedlock_session::{Error, SessionGate, SessionStatus};
use std::time::Duration;
use tokio::time::{advance, Instant};

const TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn session_starts_unauthenticated() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    assert!(!gate.is_authenticated());
    assert_eq!(SessionStatus::Unauthenticated, gate.status());
    assert_eq!(None, gate.state().expires_at);
    assert_eq!(Err(Error::SessionExpired), gate.refresh());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_expires_after_inactivity() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    gate.authenticate();
    assert!(gate.is_authenticated());

    advance(TIMEOUT - Duration::from_secs(1)).await;
    assert!(gate.is_authenticated());
    assert_eq!(Some(Duration::from_secs(1)), gate.remaining());

    advance(Duration::from_secs(2)).await;
    assert!(!gate.is_authenticated());
    assert_eq!(SessionStatus::Unauthenticated, gate.status());
    assert_eq!(None, gate.remaining());
    assert_eq!(Err(Error::SessionExpired), gate.refresh());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_refresh_resets_countdown() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    gate.authenticate();

    advance(Duration::from_secs(8)).await;
    gate.refresh()?;

    advance(Duration::from_secs(8)).await;
    assert!(gate.is_authenticated());

    advance(Duration::from_secs(3)).await;
    assert!(!gate.is_authenticated());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_authenticate_while_authenticated_resets() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    gate.authenticate();
    advance(Duration::from_secs(9)).await;
    gate.authenticate();
    advance(Duration::from_secs(9)).await;
    assert!(gate.is_authenticated());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_end() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    gate.authenticate();
    gate.end_session();
    assert!(!gate.is_authenticated());
    assert_eq!(Err(Error::SessionExpired), gate.refresh());

    // Ending twice is harmless.
    gate.end_session();
    assert!(!gate.is_authenticated());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_timer_publishes_expiry() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    let mut status = gate.subscribe();
    assert_eq!(SessionStatus::Unauthenticated, *status.borrow());

    let started = Instant::now();
    gate.authenticate();
    status.changed().await?;
    assert_eq!(SessionStatus::Authenticated, *status.borrow_and_update());

    // Paused time auto-advances to the pending timer.
    status.changed().await?;
    assert_eq!(SessionStatus::Unauthenticated, *status.borrow_and_update());
    assert!(started.elapsed() >= TIMEOUT);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_stale_timer_ignored() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    let mut status = gate.subscribe();

    gate.authenticate();
    advance(Duration::from_secs(5)).await;
    gate.end_session();
    gate.authenticate();
    status.borrow_and_update();

    // The first timer would have fired here.
    advance(Duration::from_secs(6)).await;
    tokio::task::yield_now().await;
    assert!(gate.is_authenticated());
    assert!(!status.has_changed()?);

    advance(Duration::from_secs(5)).await;
    assert!(!gate.is_authenticated());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn session_clones_share_state() -> Result<()> {
    let gate = SessionGate::new(TIMEOUT);
    let other = gate.clone();
    gate.authenticate();
    assert!(other.is_authenticated());
    other.end_session();
    assert!(!gate.is_authenticated());
    Ok(())
}

#[test]
fn session_without_runtime_enforces_expiry_on_read() {
    let gate = SessionGate::new(Duration::ZERO);
    gate.authenticate();
    assert!(!gate.is_authenticated());
}
