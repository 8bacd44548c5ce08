//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::{Gatekeeper, MasterCredentialStore, Session};
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::policy::check_strength;

/// Environment variable consulted for the master password before prompting.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local password manager behind a single master password.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local password manager protected by a master password",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .passvault, or `data_dir` from .passvault.toml)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the master password for a new vault
    Init,

    /// Add a login to the vault
    Add {
        /// Platform or site name (e.g. GitHub)
        platform: String,
        /// Login or user name on that platform
        login: String,
        /// Password to store (omit for interactive prompt)
        password: Option<String>,
        /// Store a freshly generated password instead
        #[arg(short, long, conflicts_with = "password")]
        generate: bool,
    },

    /// List stored logins (passwords stay hidden)
    List,

    /// Reveal the password of an entry
    Show {
        /// Entry number as shown by `list`
        index: usize,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Change an entry
    Edit {
        /// Entry number as shown by `list`
        index: usize,
        /// New platform name
        #[arg(long)]
        platform: Option<String>,
        /// New login
        #[arg(long)]
        login: Option<String>,
        /// Enter a new password (prompted, or read from stdin)
        #[arg(long)]
        password: bool,
        /// Replace the password with a generated one
        #[arg(short, long, conflicts_with = "password")]
        generate: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry number as shown by `list`
        index: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a strong random password
    Generate {
        /// Password length (default: `generated_length` from config, 12)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Export entries to a file or stdout
    Export {
        /// Output format: json (encrypted, default) or csv (plaintext)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.passvault.toml` from the working directory, applying `--data-dir`.
pub fn settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir.clone_from(dir);
    }
    Ok(settings)
}

/// Directory holding the vault files.
///
/// Example: `<cwd>/.passvault`
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(settings(cli)?.data_path(&cwd))
}

/// Build the verification gate for the vault selected by the CLI arguments.
pub fn gatekeeper(cli: &Cli) -> Result<Gatekeeper> {
    let cwd = std::env::current_dir()?;
    let settings = settings(cli)?;
    let store = MasterCredentialStore::new(settings.master_path(&cwd));
    Ok(Gatekeeper::new(store, settings.entries_path(&cwd)))
}

/// The master password from `PASSVAULT_PASSWORD`, if set and non-empty.
fn env_password() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripts, tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = env_password() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage, in which case a
/// weak password is an error instead of a retry.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = env_password() {
        check_strength(&pw)?;
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if let Err(e) = check_strength(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(password);
    }
}

/// Read a secret value for an entry: piped stdin when present, otherwise a
/// hidden interactive prompt.
pub fn read_secret_value(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Entries need all three fields; an empty one is refused before anything
/// is stored.
pub fn require_filled(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PassVaultError::CommandFailed(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Convert a 1-based entry number from the command line to a position.
pub fn entry_position(index: usize) -> Result<usize> {
    index.checked_sub(1).ok_or(PassVaultError::EntryNotFound(index))
}

/// Authenticate against the master password and open a session.
///
/// With `PASSVAULT_PASSWORD` set there is exactly one attempt.  Interactive
/// users may retry until the lockout engages, at which point the wait is
/// reported as a `LockedOut` error.
pub fn login(cli: &Cli) -> Result<Session> {
    let mut gate = gatekeeper(cli)?;
    if !gate.is_configured() {
        output::tip("Run `passvault init` to set a master password.");
        return Err(PassVaultError::NotConfigured);
    }

    let scripted = env_password().is_some();

    loop {
        let candidate = prompt_password()?;

        match gate.login(&candidate) {
            Ok(session) => {
                crate::audit::log_audit(cli, "login", None, None);
                if let Some(reason) = session.repository().load_error() {
                    output::warning(&format!(
                        "Could not load entries from {}: {reason}",
                        session.entries_path().display()
                    ));
                    output::tip("Changes will not be saved until the entry file is repaired.");
                }
                return Ok(session);
            }
            Err(PassVaultError::InvalidMasterPassword { failed_attempts }) => {
                crate::audit::log_audit(
                    cli,
                    "login-failed",
                    None,
                    Some(&format!("attempt {failed_attempts}")),
                );

                let now = Utc::now();
                if gate.lockout().is_blocked(now) {
                    let remaining_secs = gate.lockout().remaining_secs(now);
                    crate::audit::log_audit(
                        cli,
                        "lockout",
                        None,
                        Some(&format!("{remaining_secs}s cooldown")),
                    );
                    return Err(PassVaultError::LockedOut { remaining_secs });
                }

                if scripted {
                    return Err(PassVaultError::InvalidMasterPassword { failed_attempts });
                }
                output::warning("Wrong master password, try again.");
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_position_is_one_based() {
        assert_eq!(entry_position(1).unwrap(), 0);
        assert_eq!(entry_position(7).unwrap(), 6);
    }

    #[test]
    fn entry_position_rejects_zero() {
        assert!(matches!(
            entry_position(0),
            Err(PassVaultError::EntryNotFound(0))
        ));
    }

    #[test]
    fn require_filled_rejects_only_empty_values() {
        assert!(require_filled("login", "alice").is_ok());
        assert!(require_filled("password", " ").is_ok());
        match require_filled("platform", "") {
            Err(PassVaultError::CommandFailed(msg)) => assert_eq!(msg, "platform must not be empty"),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_add_with_generate() {
        let cli = Cli::try_parse_from(["passvault", "add", "GitHub", "alice", "--generate"]).unwrap();
        match cli.command {
            Commands::Add {
                platform,
                login,
                password,
                generate,
            } => {
                assert_eq!(platform, "GitHub");
                assert_eq!(login, "alice");
                assert!(password.is_none());
                assert!(generate);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn cli_rejects_password_with_generate() {
        let result =
            Cli::try_parse_from(["passvault", "add", "GitHub", "alice", "hunter2", "--generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_data_dir_is_global() {
        let cli = Cli::try_parse_from(["passvault", "list", "--data-dir", "vault"]).unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("vault"));
    }

    #[test]
    fn cli_export_defaults_to_json() {
        let cli = Cli::try_parse_from(["passvault", "export"]).unwrap();
        match cli.command {
            Commands::Export { format, output } => {
                assert_eq!(format, "json");
                assert!(output.is_none());
            }
            _ => panic!("expected export"),
        }
    }
}
