//! `passvault export` — write entries to a file or stdout.
//!
//! Supported formats:
//! - `json`: the stored JSON array, passwords still encrypted
//! - `csv`:  `Platform,Login,Password` with every password decrypted

use std::fs;
use std::io::Write;
use std::path::Path;

use zeroize::Zeroizing;

use crate::auth::Session;
use crate::cli::output;
use crate::cli::{login, settings, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `export` command.
pub fn execute(cli: &Cli, format: &str, output_path: Option<&str>) -> Result<()> {
    // Reject bad formats and destinations before asking for the password.
    let format = ExportFormat::parse(format)?;
    if let Some(dest) = output_path {
        refuse_vault_files(cli, Path::new(dest))?;
    }

    let session = login(cli)?;

    if format == ExportFormat::Csv {
        output::warning("CSV export contains every password in plain text. Delete it after use.");
    }

    let content = render(&session, format)?;

    crate::audit::log_audit(
        cli,
        "export",
        None,
        Some(&format!(
            "{} entries, format: {}",
            session.entries().len(),
            format.name()
        )),
    );

    // Write to file or stdout.
    match output_path {
        Some(dest) => {
            write_private(Path::new(dest), &content)?;
            output::success(&format!(
                "Exported {} entries to {} (format: {})",
                session.entries().len(),
                dest,
                format.name()
            ));
        }
        None => {
            // Write to stdout (no success message, just raw output).
            std::io::stdout().write_all(&content)?;
        }
    }

    Ok(())
}

/// Export format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn parse(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(PassVaultError::CommandFailed(format!(
                "unknown export format '{other}' — use 'json' or 'csv'"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Render the export in memory; the buffer is wiped on drop.
fn render(session: &Session, format: ExportFormat) -> Result<Zeroizing<Vec<u8>>> {
    match format {
        ExportFormat::Csv => {
            let csv = session.export_plain()?;
            Ok(Zeroizing::new(csv.as_bytes().to_vec()))
        }
        ExportFormat::Json => {
            let mut buf = Zeroizing::new(Vec::new());
            session.export_encrypted(&mut *buf)?;
            Ok(buf)
        }
    }
}

/// Refuse to export over the master record or the entry file.
fn refuse_vault_files(cli: &Cli, dest: &Path) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let dest = cwd.join(dest);

    let settings = settings(cli)?;
    let protected = [settings.master_path(&cwd), settings.entries_path(&cwd)];
    if protected.iter().any(|p| *p == dest) {
        return Err(PassVaultError::CommandFailed(
            "refusing to export over a vault file".into(),
        ));
    }
    Ok(())
}

/// Write `content` to `path`, owner-readable only on unix.
fn write_private(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| PassVaultError::CommandFailed(format!("failed to write export file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
