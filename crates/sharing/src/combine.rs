use crate::{gf256, Error, Fragment, Result};
use seedlock_core::SecretBytes;
use std::collections::BTreeMap;

/// Check that a set of fragments can be used for reconstruction.
///
/// Fragments repeating an index with the same value are counted
/// once; returns the fragments keyed by index.
fn distinct(
    fragments: &[Fragment],
    threshold: u8,
) -> Result<BTreeMap<u8, &Fragment>> {
    if threshold < 2 {
        return Err(Error::InvalidParameters {
            threshold,
            total: fragments.len(),
        });
    }

    let mut by_index: BTreeMap<u8, &Fragment> = BTreeMap::new();
    for fragment in fragments {
        if fragment.index() == 0 {
            return Err(Error::InvalidIndex);
        }
        if let Some(existing) = by_index.get(&fragment.index()) {
            if existing.value() != fragment.value() {
                return Err(Error::ConflictingFragment(fragment.index()));
            }
            continue;
        }
        by_index.insert(fragment.index(), fragment);
    }

    if by_index.len() < threshold as usize {
        return Err(Error::InsufficientFragments {
            found: by_index.len(),
            required: threshold,
        });
    }

    let mut lengths = by_index.values().map(|f| f.len());
    if let Some(expected) = lengths.next() {
        if let Some(found) = lengths.find(|len| *len != expected) {
            return Err(Error::LengthMismatch { expected, found });
        }
        if expected == 0 {
            return Err(Error::EmptySecret);
        }
    }

    Ok(by_index)
}

/// Validate fragments without reconstructing the secret.
///
/// Succeeds when there are at least `threshold` distinct non-zero
/// indices and every value has the same length.
pub fn validate(fragments: &[Fragment], threshold: u8) -> Result<()> {
    distinct(fragments, threshold).map(|_| ())
}

/// Reconstruct a secret from at least `threshold` fragments.
///
/// Uses Lagrange interpolation at `x = 0` for every byte position.
/// Any set of authentic fragments reaching the threshold yields the
/// same secret; altered fragment values yield a different secret
/// without an error.
pub fn reconstruct(
    fragments: &[Fragment],
    threshold: u8,
) -> Result<SecretBytes> {
    let by_index = distinct(fragments, threshold)?;
    let indices: Vec<u8> = by_index.keys().copied().collect();

    // Basis weights depend only on the public indices.
    let mut weights = Vec::with_capacity(indices.len());
    for (j, x_j) in indices.iter().enumerate() {
        let mut weight = 1u8;
        for (k, x_k) in indices.iter().enumerate() {
            if j == k {
                continue;
            }
            let term = gf256::lookup_divide(*x_k, gf256::add(*x_j, *x_k))?;
            weight = gf256::lookup_multiply(weight, term);
        }
        weights.push(weight);
    }

    let len = by_index.values().next().map(|f| f.len()).unwrap_or(0);
    let mut secret = vec![0u8; len];
    for (fragment, weight) in by_index.values().zip(weights.iter()) {
        for (byte, value) in secret.iter_mut().zip(fragment.value()) {
            *byte = gf256::add(*byte, gf256::multiply(*value, *weight));
        }
    }

    tracing::debug!(
        fragments = %indices.len(),
        threshold = %threshold,
        "sharing::reconstruct",
    );

    Ok(SecretBytes::new(secret))
}
