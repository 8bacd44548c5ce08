//! Key material derived from the master password.
//!
//! The vault's key schedule is the legacy one: the UTF-8
//! bytes of the master password are truncated or zero-padded to 16 bytes
//! and used directly as an AES-128 key.  There is no salt and no
//! stretching, so the key is only as strong as the first 16 bytes of the
//! password.  Existing `passwords.json` files depend on this exact
//! schedule.
//!
//! `KeyDerivation` is the seam for replacing it: a salted, iterated KDF
//! can be plugged into `VaultCipher` without touching its callers.

use zeroize::Zeroize;

/// Length of the AES-128 key in bytes.
pub const KEY_LEN: usize = 16;

/// Raw bytes used directly as the symmetric cipher key.
///
/// The bytes are wiped when the value is dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyMaterial {
    bytes: [u8; KEY_LEN],
}

impl KeyMaterial {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a block cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial(..)")
    }
}

/// Turns a master password into cipher key material.
pub trait KeyDerivation {
    fn derive(&self, master_password: &str) -> KeyMaterial;
}

/// The compatible key schedule: password bytes truncated or zero-padded
/// to `KEY_LEN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncatedKey;

impl KeyDerivation for TruncatedKey {
    fn derive(&self, master_password: &str) -> KeyMaterial {
        let mut bytes = [0u8; KEY_LEN];
        let source = master_password.as_bytes();
        let n = source.len().min(KEY_LEN);
        bytes[..n].copy_from_slice(&source[..n]);
        KeyMaterial::new(bytes)
    }
}

/// Derive key material with the default (`TruncatedKey`) schedule.
pub fn derive_key(master_password: &str) -> KeyMaterial {
    TruncatedKey.derive(master_password)
}
