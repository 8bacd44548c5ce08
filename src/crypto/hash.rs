//! Master password digest.
//!
//! The stored record is `base64(SHA-256(utf8(password)))`, unsalted and
//! single-pass.  Identical passwords always produce identical records, so
//! a stolen `master.hash` is open to offline dictionary attack.  The format
//! is kept as is for compatibility with existing installations.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compute the record value for `password`.
pub fn hash_master_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    BASE64.encode(digest)
}

/// Compare two encoded digests for exact equality in constant time.
pub fn digests_match(actual: &str, expected: &str) -> bool {
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}
