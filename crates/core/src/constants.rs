//! Constants shared by the seedlock crates.
use std::time::Duration;

/// Prefix for every key alias created in the key store.
pub const KEY_ALIAS_PREFIX: &str = "seed_lock_key_";

/// Separator between the secret identifier and the fragment index
/// in a key alias.
pub const KEY_ALIAS_SHARE: &str = "_share_";

/// Service name used for keyring entries.
pub const SERVICE_NAME: &str = "com.seedlock";

/// Number of fragments a secret is split into.
pub const TOTAL_SHARES: u8 = 3;

/// Number of fragments required to reconstruct a secret.
pub const THRESHOLD: u8 = 2;

/// Inactivity period after which an authenticated session ends.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Size of a symmetric fragment key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

/// Size of the secret checksum in bytes (SHA-256).
pub const CHECKSUM_SIZE: usize = 32;

/// File extension for stored secret records.
pub const RECORD_EXT: &str = "json";

/// Name of the application data directory.
pub const APP_DIR: &str = "seedlock";

/// Name of the configuration file in the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory for secret records in the data directory.
pub const RECORDS_DIR: &str = "records";

/// Directory for log files in the data directory.
pub const LOGS_DIR: &str = "logs";

/// Prefix for log file names.
pub const LOG_FILE_NAME: &str = "seedlock.log";
