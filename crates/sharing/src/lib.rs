//! Threshold secret sharing over GF(256).
//!
//! A secret is split into `total` fragments so that any `threshold`
//! of them reconstruct it exactly while fewer reveal nothing about it.
//! Each byte of the secret is the constant term of an independent random
//! polynomial of degree `threshold - 1`; fragment `i` holds the
//! evaluations of those polynomials at `x = i`.
//!
//! The scheme carries no integrity check: a fragment whose value was
//! altered reconstructs a different secret without any error.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod combine;
mod error;
mod fragment;
pub mod gf256;
mod split;

pub use combine::{reconstruct, validate};
pub use error::Error;
pub use fragment::{Fragment, ShareOptions};
pub use split::split;

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
