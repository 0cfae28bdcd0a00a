//! Arithmetic in GF(256) using the AES irreducible polynomial
//! `x^8 + x^4 + x^3 + x + 1` (0x11B).
//!
//! [add], [multiply], [inverse] and [divide] run in time independent of
//! their operands and are used wherever a value may be secret. The
//! log/antilog table routines are faster but index memory by operand so
//! they are reserved for public values such as fragment indices.
use crate::{Error, Result};

/// Low byte of the reduction polynomial.
const REDUCTION: u8 = 0x1B;

/// Generator of the multiplicative group used to build the tables.
const GENERATOR: u8 = 0x03;

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// Antilog table, `EXP[i] = GENERATOR^i`.
pub const EXP: [u8; 256] = TABLES.0;

/// Log table, `LOG[EXP[i]] = i`. `LOG[0]` is unused.
pub const LOG: [u8; 256] = TABLES.1;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u8 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x;
        log[x as usize] = i as u8;
        x = multiply(x, GENERATOR);
        i += 1;
    }
    exp[255] = exp[0];
    (exp, log)
}

/// Add two field elements.
///
/// Subtraction is the same operation.
#[inline]
pub const fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two field elements.
///
/// Shift-and-add with masks instead of branches.
pub const fn multiply(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    let mut i = 0;
    while i < 8 {
        product ^= a & (b & 1).wrapping_neg();
        let carry = (a >> 7).wrapping_neg();
        a = (a << 1) ^ (carry & REDUCTION);
        b >>= 1;
        i += 1;
    }
    product
}

/// Multiplicative inverse computed as `a^254`.
///
/// Returns zero for zero.
pub const fn inverse(a: u8) -> u8 {
    let a2 = multiply(a, a);
    let a4 = multiply(a2, a2);
    let a8 = multiply(a4, a4);
    let a16 = multiply(a8, a8);
    let a32 = multiply(a16, a16);
    let a64 = multiply(a32, a32);
    let a128 = multiply(a64, a64);
    multiply(
        multiply(
            multiply(multiply(multiply(multiply(a128, a64), a32), a16), a8),
            a4,
        ),
        a2,
    )
}

/// Divide `a` by `b`.
///
/// Only the divisor is checked for zero.
pub fn divide(a: u8, b: u8) -> Result<u8> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    Ok(multiply(a, inverse(b)))
}

/// Multiply using the log/antilog tables.
pub fn lookup_multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let sum = LOG[a as usize] as usize + LOG[b as usize] as usize;
    EXP[sum % 255]
}

/// Divide using the log/antilog tables.
pub fn lookup_divide(a: u8, b: u8) -> Result<u8> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let diff = LOG[a as usize] as usize + 255 - LOG[b as usize] as usize;
    Ok(EXP[diff % 255])
}

/// Evaluate a polynomial at `x` using Horner's method.
///
/// Coefficients are ordered from the constant term upwards.
pub(crate) fn evaluate(coefficients: &[u8], x: u8) -> u8 {
    coefficients
        .iter()
        .rev()
        .fold(0u8, |acc, coefficient| add(multiply(acc, x), *coefficient))
}
