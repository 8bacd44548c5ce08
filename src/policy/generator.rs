//! Random password generation.
//!
//! One character is drawn from each required class (uppercase, lowercase,
//! digit, symbol), the rest from the full alphabet, and the result is
//! shuffled so the guaranteed characters do not sit at fixed offsets.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{PassVaultError, Result};

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{}";

/// Smallest length that can hold one character of every class.
pub const MIN_GENERATED_LENGTH: usize = 4;

/// Generate a password of `length` characters that passes `is_strong`
/// whenever `length >= 8`.
pub fn generate(length: usize) -> Result<String> {
    generate_with_rng(length, &mut rand::rng())
}

/// Same as `generate`, drawing from the supplied RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<String> {
    if length < MIN_GENERATED_LENGTH {
        return Err(PassVaultError::PolicyViolation(format!(
            "generated passwords need at least {MIN_GENERATED_LENGTH} characters"
        )));
    }

    let alphabet: Vec<u8> = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS].concat();

    let mut chars = Vec::with_capacity(length);
    for class in [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS] {
        chars.push(pick(class, rng));
    }
    while chars.len() < length {
        chars.push(pick(&alphabet, rng));
    }

    // Fisher–Yates.
    chars.shuffle(rng);

    Ok(chars.into_iter().map(char::from).collect())
}

fn pick<R: Rng + ?Sized>(set: &[u8], rng: &mut R) -> u8 {
    set[rng.random_range(0..set.len())]
}
