//! `passvault audit` — display the audit log.
//!
//! Usage:
//!   passvault audit               # show last 50 entries
//!   passvault audit --last 20     # show last 20
//!   passvault audit --since 7d    # entries from last 7 days

use chrono::{DateTime, Duration, Utc};
use comfy_table::{ContentArrangement, Table};
use console::Style;

use crate::audit::AuditEntry;
use crate::cli::output;
use crate::cli::{data_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let dir = data_dir(cli)?;
    if !dir.is_dir() {
        output::info("No audit entries found.");
        output::tip("Run `passvault init` to create a vault.");
        return Ok(());
    }

    let cutoff = since.map(since_cutoff).transpose()?;
    let entries = crate::audit::recent(&dir, last, cutoff)?;
    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Time", "Operation", "Platform", "Details"]);
    for entry in &entries {
        table.add_row(audit_row(entry));
    }

    output::info(&format!("{} audit entries, newest first", entries.len()));
    println!("{table}");
    Ok(())
}

/// The instant `input` (a count of days, hours or minutes such as `7d`,
/// `24h` or `30m`) reaches back to from now.
fn since_cutoff(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let invalid = || {
        PassVaultError::CommandFailed(format!(
            "invalid duration '{input}': expected a count followed by d, h or m"
        ))
    };

    let unit_at = input.len().checked_sub(1).ok_or_else(invalid)?;
    if !input.is_char_boundary(unit_at) {
        return Err(invalid());
    }
    let (count, unit) = input.split_at(unit_at);
    let count = i64::from(count.parse::<u32>().map_err(|_| invalid())?);

    let span = match unit {
        "d" => Duration::try_days(count),
        "h" => Duration::try_hours(count),
        "m" => Duration::try_minutes(count),
        _ => None,
    };
    span.and_then(|span| Utc::now().checked_sub_signed(span))
        .ok_or_else(invalid)
}

fn audit_row(entry: &AuditEntry) -> [String; 4] {
    [
        entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        operation_style(&entry.operation)
            .apply_to(&entry.operation)
            .to_string(),
        entry.platform.clone().unwrap_or_else(|| "-".into()),
        entry.details.clone().unwrap_or_else(|| "-".into()),
    ]
}

/// Guessing attempts stand out; everything else is tinted by kind.
fn operation_style(operation: &str) -> Style {
    let style = Style::new();
    match operation {
        "login-failed" | "lockout" => style.yellow().bold(),
        "delete" => style.red(),
        "export" => style.cyan(),
        "add" | "edit" => style.blue(),
        "setup" | "login" => style.green(),
        _ => style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ago(input: &str) -> Duration {
        Utc::now() - since_cutoff(input).unwrap()
    }

    #[test]
    fn cutoff_understands_each_unit() {
        assert!((ago("7d").num_days() - 7).abs() <= 1);
        assert!((ago("24h").num_hours() - 24).abs() <= 1);
        assert!((ago(" 30m ").num_minutes() - 30).abs() <= 1);
    }

    #[test]
    fn cutoff_rejects_malformed_input() {
        for bad in ["", "abc", "7x", "d", "-5d", "1.5h", "7é", "99999999999d"] {
            assert!(since_cutoff(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn missing_fields_show_as_dash() {
        let entry = AuditEntry {
            id: 1,
            timestamp: Utc::now(),
            operation: "login".into(),
            platform: None,
            details: None,
        };
        let row = audit_row(&entry);
        assert_eq!(row[2], "-");
        assert_eq!(row[3], "-");
    }

    #[test]
    fn failed_logins_are_highlighted() {
        assert_ne!(operation_style("login-failed"), Style::new());
        assert_ne!(operation_style("lockout"), Style::new());
        assert_eq!(operation_style("something-else"), Style::new());
    }

    #[cfg(feature = "audit-log")]
    #[test]
    fn cutoff_keeps_recent_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        crate::audit::log_to(dir.path(), "add", Some("GitHub"), None);

        let entries = crate::audit::recent(dir.path(), 10, Some(since_cutoff("1h").unwrap())).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].platform.as_deref(), Some("GitHub"));
    }
}
