//! Login flow and the authenticated session.
//!
//! `Gatekeeper` owns the master password record and the lockout state for
//! the lifetime of the process.  A successful `login` hands back a
//! `Session`, which holds the verified master password and the loaded
//! entries, and is the only way to encrypt or reveal secrets.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::lockout::LockoutState;
use super::master::MasterCredentialStore;
use crate::crypto::VaultCipher;
use crate::errors::{PassVaultError, Result};
use crate::policy::check_strength;
use crate::vault::{format_as_csv, EntryRepository, PlainRow, VaultEntry};

/// Verification gate in front of the vault.
#[derive(Debug)]
pub struct Gatekeeper {
    store: MasterCredentialStore,
    entries_path: PathBuf,
    lockout: LockoutState,
}

impl Gatekeeper {
    pub fn new(store: MasterCredentialStore, entries_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            entries_path: entries_path.into(),
            lockout: LockoutState::new(),
        }
    }

    /// `true` once a master password has been set.
    pub fn is_configured(&self) -> bool {
        self.store.is_configured()
    }

    pub fn store(&self) -> &MasterCredentialStore {
        &self.store
    }

    pub fn lockout(&self) -> &LockoutState {
        &self.lockout
    }

    /// Set the master password for a fresh installation.
    ///
    /// Rejected with `PolicyViolation` before anything is written if the
    /// candidate is weak, and with `AlreadyConfigured` if a record exists.
    pub fn setup(&self, candidate: &str) -> Result<()> {
        if self.store.is_configured() {
            return Err(PassVaultError::AlreadyConfigured);
        }
        check_strength(candidate)?;
        self.store.set_password(candidate)
    }

    /// Verify `candidate` now and open a session on success.
    pub fn login(&mut self, candidate: &str) -> Result<Session> {
        self.login_at(candidate, Utc::now())
    }

    /// Verify `candidate` at instant `now` and open a session on success.
    ///
    /// While locked out the record is not consulted at all.
    pub fn login_at(&mut self, candidate: &str, now: DateTime<Utc>) -> Result<Session> {
        if self.lockout.is_blocked(now) {
            return Err(PassVaultError::LockedOut {
                remaining_secs: self.lockout.remaining_secs(now),
            });
        }

        if !self.store.is_configured() {
            return Err(PassVaultError::NotConfigured);
        }

        if !self.store.verify(candidate) {
            self.lockout.on_failure(now);
            return Err(PassVaultError::InvalidMasterPassword {
                failed_attempts: self.lockout.failed_attempts(),
            });
        }

        self.lockout.on_success();
        let repository = EntryRepository::load(&self.entries_path);
        Ok(Session::new(Zeroizing::new(candidate.to_string()), repository))
    }
}

/// An authenticated session.
///
/// Holds the master password for as long as the session lives; it is
/// wiped from memory on `logout` or drop.
pub struct Session {
    master_password: Zeroizing<String>,
    repository: EntryRepository,
    cipher: VaultCipher,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("entries", &self.repository.len())
            .field("path", &self.repository.path())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(master_password: Zeroizing<String>, repository: EntryRepository) -> Self {
        Self {
            master_password,
            repository,
            cipher: VaultCipher::new(),
        }
    }

    pub fn repository(&self) -> &EntryRepository {
        &self.repository
    }

    pub fn entries(&self) -> &[VaultEntry] {
        self.repository.entries()
    }

    pub fn entries_path(&self) -> &Path {
        self.repository.path()
    }

    /// Look up the entry at zero-based `index`.
    pub fn entry(&self, index: usize) -> Result<&VaultEntry> {
        self.repository
            .get(index)
            .ok_or(PassVaultError::EntryNotFound(index + 1))
    }

    /// Encrypt `password` and append a new entry (in memory).
    pub fn add_entry(&mut self, platform: &str, login: &str, password: &str) -> Result<()> {
        let secret = self.encrypt(password)?;
        self.repository.add(VaultEntry::new(platform, login, secret));
        Ok(())
    }

    /// Decrypt the secret of `entry`.
    pub fn reveal(&self, entry: &VaultEntry) -> Result<Zeroizing<String>> {
        self.cipher
            .decrypt(&entry.secret, &self.master_password)
            .map(Zeroizing::new)
    }

    /// Decrypt the secret of the entry at zero-based `index`.
    pub fn reveal_at(&self, index: usize) -> Result<Zeroizing<String>> {
        self.reveal(self.entry(index)?)
    }

    /// Change fields of the entry at zero-based `index` (in memory).
    ///
    /// `None` leaves a field as it is.  A new password is encrypted before
    /// it is stored.
    pub fn update_entry(
        &mut self,
        index: usize,
        platform: Option<&str>,
        login: Option<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let existing = self.entry(index)?.clone();

        let secret = match password {
            Some(p) => self.encrypt(p)?,
            None => existing.secret.clone(),
        };
        let replacement = VaultEntry::new(
            platform.unwrap_or(existing.platform.as_str()),
            login.unwrap_or(existing.login.as_str()),
            secret,
        );

        self.repository.update(&existing, replacement);
        Ok(())
    }

    /// Remove the entry at zero-based `index` (in memory) and return it.
    pub fn remove_entry(&mut self, index: usize) -> Result<VaultEntry> {
        let existing = self.entry(index)?.clone();
        self.repository.remove(&existing);
        Ok(existing)
    }

    /// Write the collection to disk.
    pub fn persist(&self) -> Result<()> {
        self.repository.persist()
    }

    /// Decrypt every entry and render the plaintext CSV export.
    ///
    /// Fails on the first secret that cannot be decrypted; nothing is
    /// substituted for it.
    pub fn export_plain(&self) -> Result<Zeroizing<String>> {
        let mut passwords = Vec::with_capacity(self.repository.len());
        for entry in self.repository.entries() {
            passwords.push(self.reveal(entry)?);
        }

        let rows = self
            .repository
            .entries()
            .iter()
            .zip(&passwords)
            .map(|(entry, password)| PlainRow {
                platform: &entry.platform,
                login: &entry.login,
                password: password.as_str(),
            });

        Ok(Zeroizing::new(format_as_csv(rows)))
    }

    /// Write the collection, still encrypted, to `writer`.
    ///
    /// Every entry is decrypted first to make sure the export only contains
    /// secrets readable under the current master password.
    pub fn export_encrypted<W: Write>(&self, writer: W) -> Result<()> {
        for entry in self.repository.entries() {
            self.reveal(entry)?;
        }
        self.repository.export_encrypted(writer)
    }

    /// End the session, wiping the held master password.
    pub fn logout(self) {}

    fn encrypt(&self, plaintext: &str) -> Result<String> {
        self.cipher.encrypt(plaintext, &self.master_password)
    }
}
