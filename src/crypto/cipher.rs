//! AES-128 encryption of individual entry secrets.
//!
//! Each secret is encrypted independently under the key derived from the
//! master password, in ECB mode with PKCS#7 padding, and stored as
//! standard base64.  This matches the output of the JCE default
//! `AES/ECB/PKCS5Padding` transform, so vault files written by earlier
//! versions of the manager decrypt unchanged.
//!
//! There is no IV: the same plaintext under the same master password
//! always produces the same ciphertext, which reveals when two entries
//! share a password.  `VaultCipher` is the place to substitute a
//! randomized mode should compatibility ever be dropped.

use aes::Aes128;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use zeroize::Zeroize;

use super::keys::{KeyDerivation, KeyMaterial, TruncatedKey};
use crate::errors::{PassVaultError, Result};

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

/// Reversible transform of secret strings keyed by the master password.
///
/// The key is re-derived on every call; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCipher<D = TruncatedKey> {
    derivation: D,
}

impl VaultCipher<TruncatedKey> {
    /// Cipher with the compatible key schedule.
    pub fn new() -> Self {
        Self {
            derivation: TruncatedKey,
        }
    }
}

impl<D: KeyDerivation> VaultCipher<D> {
    /// Cipher with a custom key schedule.
    pub fn with_derivation(derivation: D) -> Self {
        Self { derivation }
    }

    /// Derive the key material for `master_password`.
    pub fn derive_key(&self, master_password: &str) -> KeyMaterial {
        self.derivation.derive(master_password)
    }

    /// Encrypt `plaintext` and return it base64-encoded.
    pub fn encrypt(&self, plaintext: &str, master_password: &str) -> Result<String> {
        let key = self.derive_key(master_password);
        let cipher = Aes128EcbEnc::new_from_slice(key.as_bytes())
            .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(BASE64.encode(ciphertext))
    }

    /// Decrypt a value produced by `encrypt`.
    ///
    /// Malformed base64, a ciphertext that is not a whole number of
    /// blocks, bad padding, and non-UTF-8 output all map to
    /// `DecryptionFailed`.  In practice bad padding almost always means the
    /// master password differs from the one used to encrypt.
    pub fn decrypt(&self, ciphertext: &str, master_password: &str) -> Result<String> {
        let raw = BASE64
            .decode(ciphertext.trim())
            .map_err(|_| PassVaultError::DecryptionFailed)?;

        let key = self.derive_key(master_password);
        let cipher = Aes128EcbDec::new_from_slice(key.as_bytes())
            .map_err(|_| PassVaultError::DecryptionFailed)?;

        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&raw)
            .map_err(|_| PassVaultError::DecryptionFailed)?;

        // On error, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassVaultError::DecryptionFailed
        })
    }
}

/// Encrypt with the default cipher.
pub fn encrypt(plaintext: &str, master_password: &str) -> Result<String> {
    VaultCipher::new().encrypt(plaintext, master_password)
}

/// Decrypt with the default cipher.
pub fn decrypt(ciphertext: &str, master_password: &str) -> Result<String> {
    VaultCipher::new().decrypt(ciphertext, master_password)
}
