//! Presence checks using the platform authenticator.
//!
//! Linux has no platform authenticator so every check fails
//! and callers are expected to provide another [PresenceCheck].
use async_trait::async_trait;
use seedlock_session::{PresenceCheck, PresenceOutcome};

#[cfg(not(target_os = "linux"))]
mod platform {
    use robius_authentication::{
        AndroidText, BiometricStrength, Context, Policy, PolicyBuilder, Text,
        WindowsText,
    };

    /// Options for platform authentication.
    pub struct AuthenticateOptions {
        /// Biometrics strength.
        pub biometrics: BiometricStrength,
        /// Allow the device password as a fallback.
        pub password: bool,
        /// Prompt title.
        pub title: &'static str,
        /// Prompt description.
        pub description: &'static str,
    }

    impl Default for AuthenticateOptions {
        fn default() -> Self {
            Self {
                biometrics: BiometricStrength::Strong,
                password: true,
                title: "Seedlock",
                description: "Unlock your secrets",
            }
        }
    }

    /// Run the platform prompt, blocking until the user responds.
    pub fn authenticate(
        options: AuthenticateOptions,
    ) -> std::result::Result<(), String> {
        let policy: Policy = PolicyBuilder::new()
            .biometrics(Some(options.biometrics))
            .password(options.password)
            .watch(true)
            .build()
            .ok_or_else(|| "unsupported authentication policy".to_owned())?;

        let windows = WindowsText::new(options.title, options.description)
            .ok_or_else(|| "invalid prompt text".to_owned())?;

        let text: Text = Text {
            android: AndroidText {
                title: options.title,
                subtitle: None,
                description: Some(options.description),
            },
            apple: options.description,
            windows,
        };

        let context = Context::new(());
        context
            .blocking_authenticate(text, &policy)
            .map_err(|e| format!("{:?}", e))
    }

    pub fn supported() -> bool {
        true
    }
}

#[cfg(target_os = "linux")]
mod platform {
    /// Options for platform authentication.
    #[derive(Default)]
    pub struct AuthenticateOptions;

    /// Always fails, there is no platform prompt.
    pub fn authenticate(
        _options: AuthenticateOptions,
    ) -> std::result::Result<(), String> {
        Err("platform authenticator unavailable".to_owned())
    }

    pub fn supported() -> bool {
        false
    }
}

pub use platform::{authenticate, AuthenticateOptions};

/// Whether a platform authenticator exists on this target.
pub fn supported() -> bool {
    platform::supported()
}

/// Presence check backed by the platform authenticator.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalAuthenticator;

impl LocalAuthenticator {
    /// Create a local authenticator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PresenceCheck for LocalAuthenticator {
    async fn verify(&self, reason: &str) -> PresenceOutcome {
        tracing::debug!(reason = %reason, "local_auth::prompt");
        let result = tokio::task::spawn_blocking(|| {
            authenticate(AuthenticateOptions::default())
        })
        .await;
        match result {
            Ok(Ok(())) => PresenceOutcome::Success,
            Ok(Err(message)) => PresenceOutcome::Failure(message),
            Err(e) => PresenceOutcome::Failure(e.to_string()),
        }
    }
}
