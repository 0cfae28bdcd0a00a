use crate::helpers::readline::read_flag;
use async_trait::async_trait;
use seedlock_platform_authenticator::{local_auth, LocalAuthenticator};
use seedlock_session::{PresenceCheck, PresenceOutcome};
use std::sync::Arc;

/// Presence check confirmed at the terminal.
///
/// Used where there is no platform authenticator.
pub struct TerminalPresence;

#[async_trait]
impl PresenceCheck for TerminalPresence {
    async fn verify(&self, reason: &str) -> PresenceOutcome {
        let prompt = format!("{}? (y/n) ", reason);
        let result = tokio::task::spawn_blocking(move || {
            read_flag(Some(prompt.as_str()))
        })
        .await;
        match result {
            Ok(Ok(true)) => PresenceOutcome::Success,
            Ok(Ok(false)) => {
                PresenceOutcome::Failure("declined at the terminal".to_owned())
            }
            Ok(Err(e)) => PresenceOutcome::Failure(e.to_string()),
            Err(e) => PresenceOutcome::Failure(e.to_string()),
        }
    }
}

/// Presence check for this platform.
pub fn platform_presence() -> Arc<dyn PresenceCheck> {
    if local_auth::supported() {
        Arc::new(LocalAuthenticator::new())
    } else {
        tracing::debug!("presence::terminal_fallback");
        Arc::new(TerminalPresence)
    }
}
