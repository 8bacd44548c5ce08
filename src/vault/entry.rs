//! A single credential entry.

use serde::{Deserialize, Serialize};

/// One platform/login/secret record.
///
/// `secret` always holds the base64 ciphertext produced by
/// `VaultCipher::encrypt`, never plaintext.  On disk the field is called
/// `password` for compatibility with existing vault files.
///
/// Entries have no identity of their own: two entries with the same fields
/// are equal, and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    pub platform: String,
    pub login: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl VaultEntry {
    /// Build an entry from an already-encrypted secret.
    pub fn new(
        platform: impl Into<String>,
        login: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            login: login.into(),
            secret: secret.into(),
        }
    }

    /// Short label used in listings: `"<platform> - <login>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.platform, self.login)
    }
}
