//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - The `VaultEntry` type (`entry`)
//! - The JSON file format with atomic writes (`format`)
//! - CSV and encrypted JSON exports (`export`)
//! - `EntryRepository`, the ordered in-memory collection (`store`)

pub mod entry;
pub mod export;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::VaultEntry;
pub use export::{format_as_csv, PlainRow, CSV_HEADER};
pub use store::EntryRepository;
