//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-128 encryption and decryption of entry secrets (`cipher`)
//! - Key material and the key-derivation seam (`keys`)
//! - The master password digest (`hash`)

pub mod cipher;
pub mod hash;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, VaultCipher, ...};
pub use cipher::{decrypt, encrypt, VaultCipher};
pub use hash::{digests_match, hash_master_password};
pub use keys::{derive_key, KeyDerivation, KeyMaterial, TruncatedKey};
