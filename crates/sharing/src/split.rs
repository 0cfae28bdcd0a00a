use crate::{gf256, Error, Fragment, Result};
use rand::RngCore;
use seedlock_core::csprng;
use zeroize::Zeroizing;

/// Split a secret into `total` fragments of which any `threshold`
/// reconstruct it.
///
/// Fragment indices run from `1` to `total`; index zero is never
/// assigned because the polynomials evaluate to the secret there.
/// Fresh random coefficients are drawn for every byte position.
pub fn split(secret: &[u8], threshold: u8, total: u8) -> Result<Vec<Fragment>> {
    if threshold < 2 || threshold > total {
        return Err(Error::InvalidParameters {
            threshold,
            total: total as usize,
        });
    }

    if secret.is_empty() {
        return Err(Error::EmptySecret);
    }

    let mut values: Vec<Vec<u8>> =
        (0..total).map(|_| vec![0u8; secret.len()]).collect();

    let mut rng = csprng();
    let mut coefficients = Zeroizing::new(vec![0u8; threshold as usize]);
    for (position, byte) in secret.iter().enumerate() {
        coefficients[0] = *byte;
        rng.fill_bytes(&mut coefficients[1..]);
        for (slot, value) in values.iter_mut().enumerate() {
            let x = slot as u8 + 1;
            value[position] = gf256::evaluate(&coefficients, x);
        }
    }

    tracing::debug!(
        threshold = %threshold,
        total = %total,
        len = %secret.len(),
        "sharing::split",
    );

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(slot, value)| Fragment::new(slot as u8 + 1, value))
        .collect())
}
