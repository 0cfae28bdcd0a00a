use crate::{Error, Result};
use seedlock_core::constants::{THRESHOLD, TOTAL_SHARES};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// One share of a split secret.
///
/// The value is zeroed when the fragment is dropped.
#[derive(Clone)]
pub struct Fragment {
    index: u8,
    value: Zeroizing<Vec<u8>>,
}

impl Fragment {
    /// Create a fragment from an index and value.
    pub fn new(index: u8, value: Vec<u8>) -> Self {
        Self {
            index,
            value: Zeroizing::new(value),
        }
    }

    /// Index of the fragment, the x-coordinate of the share.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Value of the fragment.
    pub fn value(&self) -> &[u8] {
        self.value.as_slice()
    }

    /// Length of the value in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("index", &self.index)
            .field("len", &self.value.len())
            .finish_non_exhaustive()
    }
}

/// Threshold and fragment count for splitting a secret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct ShareOptions {
    threshold: u8,
    total: u8,
}

impl ShareOptions {
    /// Create share options.
    ///
    /// Requires `2 <= threshold <= total`; the upper bound of 255
    /// fragments follows from the index being a non-zero field element.
    pub fn new(threshold: u8, total: u8) -> Result<Self> {
        if threshold < 2 || threshold > total {
            return Err(Error::InvalidParameters {
                threshold,
                total: total as usize,
            });
        }
        Ok(Self { threshold, total })
    }

    /// Minimum number of fragments to reconstruct.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Number of fragments produced.
    pub fn total(&self) -> u8 {
        self.total
    }

    /// Split a secret using these options.
    pub fn split(&self, secret: &[u8]) -> Result<Vec<Fragment>> {
        crate::split(secret, self.threshold, self.total)
    }
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            total: TOTAL_SHARES,
        }
    }
}
