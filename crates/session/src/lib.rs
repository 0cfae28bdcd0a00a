//! Authentication session for the seedlock secret vault.
//!
//! The [SessionGate] decides whether the standing key may be used
//! without a fresh presence check; a [PresenceCheck] performs that
//! check when the session is not authenticated.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod gate;
mod presence;

pub use error::Error;
pub use gate::{SessionGate, SessionState, SessionStatus};
pub use presence::{PresenceCheck, PresenceOutcome};

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
