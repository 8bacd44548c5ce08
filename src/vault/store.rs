//! In-memory entry collection and its persistence.
//!
//! `EntryRepository` owns the ordered list of entries for one session.
//! It never sees plaintext: secrets are encrypted by `Session` before they
//! reach the repository, and decrypted by `Session` on the way out.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{PassVaultError, Result};

use super::entry::VaultEntry;
use super::{export, format};

/// Ordered collection of encrypted entries backed by a JSON file.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    /// Path to the `passwords.json` file on disk.
    path: PathBuf,

    /// Entries in insertion order.
    entries: Vec<VaultEntry>,

    /// Why the backing file could not be read, if it could not.  While set,
    /// `persist` refuses to replace the file.
    load_error: Option<String>,
}

impl EntryRepository {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// An empty repository that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            load_error: None,
        }
    }

    /// Load the collection at `path`, propagating read and parse errors.
    ///
    /// A missing file is not an error; it yields an empty repository.
    pub fn try_load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = format::read_entries(&path)?;
        Ok(Self {
            path,
            entries,
            load_error: None,
        })
    }

    /// Load the collection at `path`.
    ///
    /// Read or parse failures yield an empty repository that remembers the
    /// failure (see [`load_error`](Self::load_error)).  Such a repository
    /// can be browsed but never persisted over the unreadable file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_load(&path) {
            Ok(repo) => repo,
            Err(e) => Self {
                load_error: Some(e.to_string()),
                ..Self::new(path)
            },
        }
    }

    // ------------------------------------------------------------------
    // Mutation (in memory only; call `persist` to write)
    // ------------------------------------------------------------------

    /// Append an entry.
    pub fn add(&mut self, entry: VaultEntry) {
        self.entries.push(entry);
    }

    /// Replace the first entry equal to `existing` with `replacement`,
    /// keeping its position.  Returns `false` if nothing matched.
    pub fn update(&mut self, existing: &VaultEntry, replacement: VaultEntry) -> bool {
        match self.entries.iter().position(|e| e == existing) {
            Some(index) => {
                self.entries[index] = replacement;
                true
            }
            None => false,
        }
    }

    /// Remove the first entry equal to `entry`.  Returns `false` if nothing
    /// matched.
    pub fn remove(&mut self, entry: &VaultEntry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Overwrite the backing file with the full collection.
    ///
    /// Fails without touching the file when it could not be loaded.
    pub fn persist(&self) -> Result<()> {
        if let Some(reason) = &self.load_error {
            return Err(PassVaultError::SerializationError(format!(
                "refusing to overwrite {} (it could not be loaded: {reason})",
                self.path.display()
            )));
        }
        format::write_entries(&self.path, &self.entries)
    }

    /// Write the collection, still encrypted, to `writer`.
    pub fn export_encrypted<W: Write>(&self, writer: W) -> Result<()> {
        export::write_encrypted(&self.entries, writer)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The read or parse failure hit by [`load`](Self::load), if any.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Returns the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    /// Entry at zero-based `index`.
    pub fn get(&self, index: usize) -> Option<&VaultEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
