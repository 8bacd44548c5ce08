use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the vault files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File name of the master password record inside `data_dir`.
    #[serde(default = "default_master_file")]
    pub master_file: String,

    /// File name of the entry collection inside `data_dir`.
    #[serde(default = "default_entries_file")]
    pub entries_file: String,

    /// Length of passwords produced by `generate` (default: 12).
    #[serde(default = "default_generated_length")]
    pub generated_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".passvault".to_string()
}

fn default_master_file() -> String {
    "master.hash".to_string()
}

fn default_entries_file() -> String {
    "passwords.json".to_string()
}

fn default_generated_length() -> usize {
    12
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            master_file: default_master_file(),
            entries_file: default_entries_file(),
            generated_length: default_generated_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the vault unusable.
    pub fn validate(&self) -> Result<()> {
        if self.master_file.is_empty() || self.entries_file.is_empty() {
            return Err(PassVaultError::ConfigError(
                "master_file and entries_file cannot be empty".into(),
            ));
        }
        if self.master_file == self.entries_file {
            return Err(PassVaultError::ConfigError(
                "master_file and entries_file must be different files".into(),
            ));
        }
        if self.generated_length < crate::policy::MIN_GENERATED_LENGTH {
            return Err(PassVaultError::ConfigError(format!(
                "generated_length must be at least {}",
                crate::policy::MIN_GENERATED_LENGTH
            )));
        }
        Ok(())
    }

    /// Directory holding the vault files.
    ///
    /// Example: `project_dir/.passvault`
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Path to the master password record.
    pub fn master_path(&self, project_dir: &Path) -> PathBuf {
        self.data_path(project_dir).join(&self.master_file)
    }

    /// Path to the entry collection.
    pub fn entries_path(&self, project_dir: &Path) -> PathBuf {
        self.data_path(project_dir).join(&self.entries_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
