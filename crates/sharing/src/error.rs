use thiserror::Error;

/// Errors generated by the secret sharing library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error generated when the threshold and fragment count are not
    /// in the range `2 <= threshold <= total <= 255`.
    #[error("invalid sharing parameters, threshold {threshold} of {total} fragments")]
    InvalidParameters {
        /// Requested threshold.
        threshold: u8,
        /// Requested or supplied number of fragments.
        total: usize,
    },

    /// Error generated when attempting to split an empty secret.
    #[error("cannot split an empty secret")]
    EmptySecret,

    /// Error generated when fragment values differ in length.
    #[error("fragment length mismatch, expected {expected} bytes but got {found}")]
    LengthMismatch {
        /// Length of the first fragment value.
        expected: usize,
        /// Length of the offending fragment value.
        found: usize,
    },

    /// Error generated when there are not enough distinct fragments
    /// to reach the threshold.
    #[error("insufficient fragments, {found} supplied but {required} required")]
    InsufficientFragments {
        /// Number of distinct fragments supplied.
        found: usize,
        /// Threshold required for reconstruction.
        required: u8,
    },

    /// Error generated when a fragment uses the reserved index zero.
    #[error("fragment index zero is reserved for the secret")]
    InvalidIndex,

    /// Error generated when two fragments share an index but
    /// carry different values.
    #[error("conflicting fragments for index {0}")]
    ConflictingFragment(u8),

    /// Error generated when dividing by zero in GF(256).
    #[error("division by zero in GF(256)")]
    DivisionByZero,
}
