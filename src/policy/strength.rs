//! Strength check for new master passwords.

use crate::errors::{PassVaultError, Result};

/// Minimum password length, counted in characters.
pub const MIN_LENGTH: usize = 8;

/// Check `candidate` against the strength rules, naming the first rule it
/// breaks.
///
/// A strong password is at least `MIN_LENGTH` characters long and contains
/// an ASCII uppercase letter, an ASCII lowercase letter, an ASCII digit,
/// and at least one character outside `[A-Za-z0-9]`.
pub fn check_strength(candidate: &str) -> Result<()> {
    if candidate.chars().count() < MIN_LENGTH {
        return Err(PassVaultError::PolicyViolation(format!(
            "must be at least {MIN_LENGTH} characters"
        )));
    }
    if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PassVaultError::PolicyViolation(
            "must contain an uppercase letter".into(),
        ));
    }
    if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PassVaultError::PolicyViolation(
            "must contain a lowercase letter".into(),
        ));
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(PassVaultError::PolicyViolation(
            "must contain a digit".into(),
        ));
    }
    if candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PassVaultError::PolicyViolation(
            "must contain a symbol (a character other than A-Z, a-z, 0-9)".into(),
        ));
    }
    Ok(())
}

/// Returns `true` if `candidate` satisfies every strength rule.
pub fn is_strong(candidate: &str) -> bool {
    check_strength(candidate).is_ok()
}
