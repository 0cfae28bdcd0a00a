use async_trait::async_trait;

/// Result of a single presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceOutcome {
    /// User presence was confirmed.
    Success,
    /// User presence could not be confirmed.
    Failure(String),
}

impl PresenceOutcome {
    /// Whether the check succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, PresenceOutcome::Success)
    }
}

/// Prompt that confirms the user is present, for example a
/// biometric or device password dialog.
///
/// Every invocation yields exactly one outcome.
#[async_trait]
pub trait PresenceCheck: Send + Sync {
    /// Ask the user to confirm their presence.
    ///
    /// The reason is shown to the user where the platform supports it.
    async fn verify(&self, reason: &str) -> PresenceOutcome;
}
