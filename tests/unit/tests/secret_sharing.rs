use anyhow::Result;
use seedlock_sharing::{
    gf256, reconstruct, split, validate, Error, Fragment, ShareOptions,
};

const PHRASE: &str = "correct horse battery staff";

/// Every subset of `size` taken from `items`.
fn subsets<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for (i, item) in items.iter().enumerate() {
        for mut rest in subsets(&items[i + 1..], size - 1) {
            rest.insert(0, item.clone());
            out.push(rest);
        }
    }
    out
}

#[test]
fn sharing_concrete_scenario() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 2, 3)?;
    assert_eq!(3, fragments.len());
    assert_eq!(
        vec![1, 2, 3],
        fragments.iter().map(|f| f.index()).collect::<Vec<_>>()
    );

    let chosen = vec![fragments[0].clone(), fragments[2].clone()];
    let secret = reconstruct(&chosen, 2)?;
    assert_eq!(PHRASE.as_bytes(), secret.expose());

    let only_second = vec![fragments[1].clone()];
    assert_eq!(
        Err(Error::InsufficientFragments {
            found: 1,
            required: 2
        }),
        reconstruct(&only_second, 2).map(|_| ())
    );
    Ok(())
}

#[test]
fn sharing_round_trip_all_subsets() -> Result<()> {
    let secrets: Vec<Vec<u8>> = vec![
        vec![0x00],
        vec![0xff; 7],
        PHRASE.as_bytes().to_vec(),
        (0..=255u8).collect(),
    ];
    let parameters = [(2u8, 2u8), (2, 3), (3, 5), (4, 6), (5, 5)];

    for secret in &secrets {
        for (threshold, total) in parameters {
            let fragments = split(secret, threshold, total)?;
            assert_eq!(total as usize, fragments.len());
            for fragment in &fragments {
                assert_eq!(secret.len(), fragment.len());
            }

            for size in threshold as usize..=total as usize {
                for subset in subsets(&fragments, size) {
                    let recovered = reconstruct(&subset, threshold)?;
                    assert_eq!(secret.as_slice(), recovered.expose());
                }
            }
        }
    }
    Ok(())
}

#[test]
fn sharing_subset_independence() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 3, 5)?;
    let first = reconstruct(&fragments[0..3], 3)?;
    let second = reconstruct(&fragments[2..5], 3)?;
    let reordered = vec![
        fragments[4].clone(),
        fragments[0].clone(),
        fragments[3].clone(),
    ];
    let third = reconstruct(&reordered, 3)?;
    assert_eq!(first.expose(), second.expose());
    assert_eq!(first.expose(), third.expose());
    Ok(())
}

#[test]
fn sharing_threshold_necessity() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 4, 6)?;
    for size in 1..4 {
        for subset in subsets(&fragments, size) {
            match reconstruct(&subset, 4) {
                Err(Error::InsufficientFragments { found, required }) => {
                    assert_eq!(size, found);
                    assert_eq!(4, required);
                }
                other => panic!("expected insufficient fragments, got {:?}", other),
            }
        }
    }
    assert!(matches!(
        reconstruct(&[], 2),
        Err(Error::InsufficientFragments { found: 0, .. })
    ));
    Ok(())
}

fn flip(fragment: &Fragment, position: usize, mask: u8) -> Fragment {
    let mut value = fragment.value().to_vec();
    value[position] ^= mask;
    Fragment::new(fragment.index(), value)
}

#[test]
fn sharing_duplicate_indices_do_not_count() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 2, 3)?;
    let repeated = vec![fragments[1].clone(), fragments[1].clone()];
    assert!(matches!(
        reconstruct(&repeated, 2),
        Err(Error::InsufficientFragments { found: 1, .. })
    ));

    let altered = flip(&fragments[1], 0, 0x01);
    let conflicting = vec![fragments[1].clone(), altered, fragments[0].clone()];
    assert_eq!(
        Err(Error::ConflictingFragment(2)),
        reconstruct(&conflicting, 2).map(|_| ())
    );
    Ok(())
}

#[test]
fn sharing_corruption_changes_output() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 2, 3)?;
    for position in [0, PHRASE.len() / 2, PHRASE.len() - 1] {
        let corrupted = flip(&fragments[2], position, 0x5a);
        let subset = vec![fragments[0].clone(), corrupted];
        let recovered = reconstruct(&subset, 2)?;
        assert_eq!(PHRASE.len(), recovered.len());
        assert_ne!(PHRASE.as_bytes(), recovered.expose());
    }
    Ok(())
}

#[test]
fn sharing_length_mismatch() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 2, 3)?;
    let short = Fragment::new(3, fragments[2].value()[1..].to_vec());
    let subset = vec![fragments[0].clone(), short];
    assert_eq!(
        Err(Error::LengthMismatch {
            expected: PHRASE.len(),
            found: PHRASE.len() - 1,
        }),
        reconstruct(&subset, 2).map(|_| ())
    );
    assert!(validate(&subset, 2).is_err());
    Ok(())
}

#[test]
fn sharing_invalid_parameters() {
    for (threshold, total) in [(0u8, 3u8), (1, 3), (4, 3), (2, 1), (0, 0)] {
        assert_eq!(
            Err(Error::InvalidParameters {
                threshold,
                total: total as usize,
            }),
            split(b"secret", threshold, total).map(|_| ())
        );
        assert!(ShareOptions::new(threshold, total).is_err());
    }
    assert_eq!(Err(Error::EmptySecret), split(b"", 2, 3).map(|_| ()));
}

#[test]
fn sharing_maximum_fragments() -> Result<()> {
    let fragments = split(b"k", 2, 255)?;
    assert_eq!(255, fragments.len());
    assert_eq!(Some(255), fragments.last().map(|f| f.index()));
    let pair = vec![fragments[0].clone(), fragments[254].clone()];
    assert_eq!(b"k", reconstruct(&pair, 2)?.expose());
    Ok(())
}

#[test]
fn sharing_zero_index_rejected() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 2, 3)?;
    let zero = Fragment::new(0, fragments[0].value().to_vec());
    assert_eq!(
        Err(Error::InvalidIndex),
        validate(&[zero, fragments[1].clone()], 2)
    );
    Ok(())
}

#[test]
fn sharing_validate() -> Result<()> {
    let fragments = split(PHRASE.as_bytes(), 3, 5)?;
    assert!(validate(&fragments, 3).is_ok());
    assert!(validate(&fragments[..3], 3).is_ok());
    assert!(validate(&fragments[..2], 3).is_err());
    Ok(())
}

#[test]
fn sharing_fresh_randomness() -> Result<()> {
    let secret = [0x42u8; 32];
    let first = split(&secret, 2, 3)?;
    let second = split(&secret, 2, 3)?;
    assert_ne!(first[0].value(), second[0].value());
    // Coefficients differ per position so fragments do not repeat
    // the constant secret pattern.
    assert!(first[0].value().windows(2).any(|w| w[0] != w[1]));
    Ok(())
}

#[test]
fn sharing_default_options() -> Result<()> {
    let options = ShareOptions::default();
    assert_eq!(2, options.threshold());
    assert_eq!(3, options.total());
    let fragments = options.split(PHRASE.as_bytes())?;
    assert_eq!(3, fragments.len());
    Ok(())
}

#[test]
fn field_arithmetic() -> Result<()> {
    assert_eq!(0, gf256::add(0x57, 0x57));
    assert_eq!(0xd4, gf256::add(0x57, 0x83));
    assert_eq!(0xc1, gf256::multiply(0x57, 0x83));
    assert_eq!(0x57, gf256::divide(0xc1, 0x83)?);
    assert!(gf256::divide(0x01, 0x00).is_err());
    for a in 1..=255u8 {
        assert_eq!(1, gf256::multiply(a, gf256::inverse(a)));
        assert_eq!(0, gf256::multiply(a, 0));
    }
    Ok(())
}
