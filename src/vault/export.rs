//! Export formats.
//!
//! - Plaintext CSV with header `Platform,Login,Password`, one decrypted row
//!   per entry.  This defeats encryption at rest, so callers should make
//!   it an explicit choice.
//! - Encrypted JSON, byte-for-byte the format of the primary store.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write;

use super::entry::VaultEntry;
use super::format::to_json_pretty;
use crate::errors::Result;

/// Header row of the plaintext export.
pub const CSV_HEADER: &str = "Platform,Login,Password";

/// A decrypted entry, borrowed for the duration of an export.
#[derive(Debug, Clone, Copy)]
pub struct PlainRow<'a> {
    pub platform: &'a str,
    pub login: &'a str,
    pub password: &'a str,
}

/// Render decrypted rows as CSV.
///
/// Fields containing a comma, double quote, or line break are quoted and
/// inner quotes doubled (RFC 4180); all other fields are written as is.
pub fn format_as_csv<'a>(rows: impl IntoIterator<Item = PlainRow<'a>>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{CSV_HEADER}");
    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{}",
            csv_field(row.platform),
            csv_field(row.login),
            csv_field(row.password)
        );
    }
    out
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Write entries, still encrypted, in the store's JSON format.
pub fn write_encrypted<W: Write>(entries: &[VaultEntry], mut writer: W) -> Result<()> {
    let json = to_json_pretty(entries)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}
