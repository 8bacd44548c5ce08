//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every vault operation (setup, login, add, edit,
//! delete, export) in a local SQLite database at `<data_dir>/audit.db`.
//! Failed logins and lockout refusals are recorded too, which makes
//! guessing attempts visible after the fact.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.  Secret
//! values are never written to the log.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::Cli;
#[cfg(feature = "audit-log")]
use crate::errors::PassVaultError;
use crate::errors::Result;

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub platform: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
#[cfg(feature = "audit-log")]
pub struct AuditLog {
    conn: rusqlite::Connection,
}

#[cfg(feature = "audit-log")]
impl AuditLog {
    /// Open (or create) the audit database at `<data_dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened — callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(data_dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(data_dir);
        let conn = rusqlite::Connection::open(&db_path).ok()?;

        // Set restrictive permissions on the audit database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        // Create the table if it doesn't exist.
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                platform    TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget — errors are silently ignored.
    pub fn log(&self, operation: &str, platform: Option<&str>, details: Option<&str>) {
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, platform, details)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![Utc::now(), operation, platform, details],
        );
    }

    /// Newest entries first, at most `limit` of them, restricted to those
    /// recorded at or after `since` when given.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let failed = |e: rusqlite::Error| PassVaultError::AuditError(e.to_string());

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, platform, details FROM audit_log
                 WHERE ?1 IS NULL OR timestamp >= ?1
                 ORDER BY id DESC LIMIT ?2",
            )
            .map_err(failed)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(rusqlite::params![since, limit], |row| {
                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    operation: row.get(2)?,
                    platform: row.get(3)?,
                    details: row.get(4)?,
                })
            })
            .map_err(failed)?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(failed)
    }

    /// Return the path to the audit database (for testing/display).
    pub fn db_path(data_dir: &Path) -> PathBuf {
        data_dir.join("audit.db")
    }
}

/// Convenience helper: log an audit event using the CLI context.
///
/// Opens the audit database, logs the event, and silently ignores any errors.
/// This is safe to call from any command — it never fails the parent operation.
pub fn log_audit(cli: &Cli, op: &str, platform: Option<&str>, details: Option<&str>) {
    let Ok(data_dir) = crate::cli::data_dir(cli) else {
        return;
    };
    log_to(&data_dir, op, platform, details);
}

/// Log an audit event into the database under `data_dir`.
#[cfg(feature = "audit-log")]
pub fn log_to(data_dir: &Path, op: &str, platform: Option<&str>, details: Option<&str>) {
    if let Some(audit) = AuditLog::open(data_dir) {
        audit.log(op, platform, details);
    }
}

/// Log an audit event into the database under `data_dir`.
#[cfg(not(feature = "audit-log"))]
pub fn log_to(_data_dir: &Path, _op: &str, _platform: Option<&str>, _details: Option<&str>) {}

/// Read recent audit entries from the database under `data_dir`.
#[cfg(feature = "audit-log")]
pub fn recent(data_dir: &Path, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
    let audit = AuditLog::open(data_dir)
        .ok_or_else(|| PassVaultError::AuditError("failed to open audit database".into()))?;
    audit.query(limit, since)
}

/// Read recent audit entries from the database under `data_dir`.
#[cfg(not(feature = "audit-log"))]
pub fn recent(
    _data_dir: &Path,
    _limit: usize,
    _since: Option<DateTime<Utc>>,
) -> Result<Vec<AuditEntry>> {
    Err(crate::errors::PassVaultError::AuditError(
        "this build does not include the audit log (feature `audit-log`)".into(),
    ))
}
