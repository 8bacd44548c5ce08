use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Cannot reveal this secret — wrong master password or corrupted data")]
    DecryptionFailed,

    // --- Master password errors ---
    #[error("Password rejected: {0}")]
    PolicyViolation(String),

    #[error("Too many failed attempts — try again in {remaining_secs}s")]
    LockedOut { remaining_secs: u64 },

    #[error("Invalid master password ({failed_attempts} failed attempt(s))")]
    InvalidMasterPassword { failed_attempts: u32 },

    #[error("No master password is configured — run `passvault init` first")]
    NotConfigured,

    #[error("A master password is already configured")]
    AlreadyConfigured,

    // --- Vault errors ---
    #[error("Entry #{0} not found")]
    EntryNotFound(usize),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
