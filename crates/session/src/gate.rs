//! Authentication state machine with an inactivity timeout.
//!
//! ```text
//!                 authenticate()
//! Unauthenticated ───────────────▶ Authenticated ──┐ refresh()
//!        ▲                             │   ▲       │ authenticate()
//!        └── end_session() / timeout ──┘   └───────┘
//! ```
//!
//! Every transition into or within `Authenticated` restarts the
//! timer. Only one timer exists at a time; restarting aborts the
//! previous one and a stale timer that still fires is ignored.
use crate::{Error, Result};
use parking_lot::Mutex;
use seedlock_core::constants::SESSION_TIMEOUT;
use std::sync::{Arc, Weak};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{Duration, Instant},
};

/// Observable status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No session, the presence-gated key must be used.
    Unauthenticated,
    /// Session is active, the standing key may be used.
    Authenticated,
}

/// Snapshot of the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Whether the session is authenticated.
    pub authenticated: bool,
    /// When the session expires unless refreshed.
    pub expires_at: Option<Instant>,
}

#[derive(Default)]
struct GateState {
    authenticated: bool,
    expires_at: Option<Instant>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl GateState {
    fn is_live(&self, now: Instant) -> bool {
        self.authenticated
            && self.expires_at.map(|deadline| now < deadline).unwrap_or(false)
    }

    fn teardown(&mut self) {
        self.authenticated = false;
        self.expires_at = None;
        self.generation = self.generation.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Shared {
    timeout: Duration,
    state: Mutex<GateState>,
    status: watch::Sender<SessionStatus>,
}

impl Shared {
    fn publish(&self, status: SessionStatus) {
        self.status.send_if_modified(|current| {
            if *current != status {
                *current = status;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(timer) = self.state.get_mut().timer.take() {
            timer.abort();
        }
    }
}

/// Gate that tracks whether the user recently proved their presence.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionGate {
    shared: Arc<Shared>,
}

impl SessionGate {
    /// Create a session gate with an inactivity timeout.
    pub fn new(timeout: Duration) -> Self {
        let (status, _) = watch::channel(SessionStatus::Unauthenticated);
        Self {
            shared: Arc::new(Shared {
                timeout,
                state: Mutex::new(GateState::default()),
                status,
            }),
        }
    }

    /// Inactivity timeout for the session.
    pub fn timeout(&self) -> Duration {
        self.shared.timeout
    }

    /// Mark the session as authenticated after a successful
    /// presence check.
    ///
    /// When the session is already authenticated this resets
    /// the timer.
    pub fn authenticate(&self) {
        let mut state = self.shared.state.lock();
        let started = !state.is_live(Instant::now());
        state.authenticated = true;
        self.restart_timer(&mut state);
        self.shared.publish(SessionStatus::Authenticated);
        if started {
            tracing::debug!(
                timeout_secs = %self.shared.timeout.as_secs(),
                "session::started",
            );
        }
    }

    /// Reset the inactivity timer.
    ///
    /// Only valid while authenticated, otherwise returns
    /// [Error::SessionExpired].
    pub fn refresh(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        if !state.is_live(Instant::now()) {
            if state.authenticated {
                state.teardown();
                self.shared.publish(SessionStatus::Unauthenticated);
                tracing::debug!("session::expired");
            }
            return Err(Error::SessionExpired);
        }
        self.restart_timer(&mut state);
        tracing::trace!("session::refreshed");
        Ok(())
    }

    /// End the session.
    pub fn end_session(&self) {
        let mut state = self.shared.state.lock();
        state.teardown();
        self.shared.publish(SessionStatus::Unauthenticated);
        tracing::debug!("session::ended");
    }

    /// Whether the session is currently authenticated.
    ///
    /// A session whose deadline has passed is torn down here
    /// even if the timer has not fired yet.
    pub fn is_authenticated(&self) -> bool {
        let mut state = self.shared.state.lock();
        let live = state.is_live(Instant::now());
        if state.authenticated && !live {
            state.teardown();
            self.shared.publish(SessionStatus::Unauthenticated);
            tracing::debug!("session::expired");
        }
        live
    }

    /// Current status of the session.
    pub fn status(&self) -> SessionStatus {
        if self.is_authenticated() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    /// Snapshot of the session state.
    pub fn state(&self) -> SessionState {
        let authenticated = self.is_authenticated();
        let state = self.shared.state.lock();
        SessionState {
            authenticated,
            expires_at: if authenticated { state.expires_at } else { None },
        }
    }

    /// Time left before the session expires.
    pub fn remaining(&self) -> Option<Duration> {
        self.state()
            .expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Subscribe to session status changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.shared.status.subscribe()
    }

    fn restart_timer(&self, state: &mut GateState) {
        state.generation = state.generation.wrapping_add(1);
        let deadline = Instant::now() + self.shared.timeout;
        state.expires_at = Some(deadline);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        // Without a runtime expiry is still enforced on read.
        if let Ok(handle) = Handle::try_current() {
            let shared = Arc::downgrade(&self.shared);
            let generation = state.generation;
            state.timer = Some(handle.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                expire(shared, generation);
            }));
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(SESSION_TIMEOUT)
    }
}

fn expire(shared: Weak<Shared>, generation: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut state = shared.state.lock();
    if state.generation != generation || !state.authenticated {
        return;
    }
    // Running as this timer, nothing to abort.
    state.timer = None;
    state.teardown();
    shared.publish(SessionStatus::Unauthenticated);
    tracing::info!(
        timeout_secs = %shared.timeout.as_secs(),
        "session::timed_out",
    );
}
