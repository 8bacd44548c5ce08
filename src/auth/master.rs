//! Persisted master password record.
//!
//! The record is a single-line text file holding the base64 SHA-256
//! digest of the master password.  Its presence is what marks the
//! installation as configured.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::crypto::hash::{digests_match, hash_master_password};
use crate::errors::Result;

/// Reads and writes the master password record at a fixed path.
#[derive(Debug, Clone)]
pub struct MasterCredentialStore {
    path: PathBuf,
}

impl MasterCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` iff a record exists.
    pub fn is_configured(&self) -> bool {
        self.path.is_file()
    }

    /// Hash `candidate` and write it as the sole content of the record,
    /// replacing any previous value.
    ///
    /// No strength check happens here; see `Gatekeeper::setup`.
    pub fn set_password(&self, candidate: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, hash_master_password(candidate))?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// `true` iff the record exists and its first line equals the digest
    /// of `candidate`.
    ///
    /// A missing or unreadable record yields `false`, never an error;
    /// use `is_configured` to tell "not set up" apart from "wrong password".
    pub fn verify(&self, candidate: &str) -> bool {
        match self.read_record() {
            Ok(Some(stored)) => digests_match(&hash_master_password(candidate), &stored),
            Ok(None) | Err(_) => false,
        }
    }

    fn read_record(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = fs::File::open(&self.path)?;
        let mut line = String::new();
        if BufReader::new(file).read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
