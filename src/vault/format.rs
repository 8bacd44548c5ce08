//! On-disk format of the entry collection.
//!
//! The collection is a pretty-printed JSON array:
//!
//! ```text
//! [
//!   {
//!     "platform": "GitHub",
//!     "login": "dev@x.com",
//!     "password": "8oqv5Ig/34czWLZgL1iE9w=="
//!   }
//! ]
//! ```
//!
//! The file is always rewritten in full.  Writes go through a temporary
//! file in the same directory that is renamed over the target, so readers
//! see either the old collection or the new one, never a partial write.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::entry::VaultEntry;
use crate::errors::{PassVaultError, Result};

/// Serialize entries as a pretty-printed JSON array (two-space indent).
pub fn to_json_pretty(entries: &[VaultEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries)
        .map_err(|e| PassVaultError::SerializationError(format!("entries: {e}")))
}

/// Parse a JSON array of entries.
///
/// A `null` document is accepted and treated as an empty collection.
pub fn from_json(data: &[u8]) -> Result<Vec<VaultEntry>> {
    let parsed: Option<Vec<VaultEntry>> = serde_json::from_slice(data)
        .map_err(|e| PassVaultError::SerializationError(format!("entries JSON: {e}")))?;
    Ok(parsed.unwrap_or_default())
}

/// Read the entry collection at `path`.
///
/// A missing file is the first-run state and yields `Ok(vec![])`.
pub fn read_entries(path: &Path) -> Result<Vec<VaultEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read(path)?;
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    from_json(&data)
}

/// Write the entry collection to `path` **atomically**.
///
/// 1. Serialize entries to pretty JSON.
/// 2. Write to a temp file in the same directory and fsync it.
/// 3. Rename the temp file over the target path.
///
/// If any step fails the temp file is removed and the previous
/// collection is left untouched.
pub fn write_entries(path: &Path, entries: &[VaultEntry]) -> Result<()> {
    let json = to_json_pretty(entries)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    // On Unix, restrict permissions to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    tmp.persist(path).map_err(|e| PassVaultError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<VaultEntry> {
        vec![
            VaultEntry::new("Google", "mymail@gmail.com", "Y3QtMQ=="),
            VaultEntry::new("Facebook", "FBUser", "Y3QtMg=="),
        ]
    }

    #[test]
    fn pretty_json_layout() {
        let json = to_json_pretty(&[VaultEntry::new("GitHub", "dev@x.com", "abc=")]).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"platform\": \"GitHub\",\n    \"login\": \"dev@x.com\",\n    \"password\": \"abc=\"\n  }\n]"
        );
    }

    #[test]
    fn empty_collection_is_empty_array() {
        assert_eq!(to_json_pretty(&[]).unwrap(), "[]");
    }

    #[test]
    fn write_then_read_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");

        write_entries(&path, &sample()).unwrap();
        let loaded = read_entries(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = read_entries(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn null_and_blank_documents_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");

        fs::write(&path, "null").unwrap();
        assert!(read_entries(&path).unwrap().is_empty());

        fs::write(&path, "  \n").unwrap();
        assert!(read_entries(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        fs::write(&path, "{not json").unwrap();

        assert!(read_entries(&path).is_err());
    }

    #[test]
    fn reads_files_written_by_other_tools() {
        // Field order and indentation differ from ours; only names matter.
        let doc = r#"[{"password":"eA==","login":"me","platform":"Mail"}]"#;
        let entries = from_json(doc.as_bytes()).unwrap();
        assert_eq!(entries, vec![VaultEntry::new("Mail", "me", "eA==")]);
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");

        write_entries(&path, &sample()).unwrap();
        write_entries(&path, &sample()[..1]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("passwords.json")]);
        assert_eq!(read_entries(&path).unwrap().len(), 1);
    }

    #[test]
    fn failed_write_keeps_previous_collection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        write_entries(&path, &sample()).unwrap();

        // Renaming a file over a non-empty directory fails on every platform.
        let blocked = dir.path().join("blocked");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();
        assert!(write_entries(&blocked, &sample()).is_err());

        assert_eq!(read_entries(&path).unwrap(), sample());
    }
}
