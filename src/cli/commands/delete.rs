//! `passvault delete` — remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{entry_position, login, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, index: usize, force: bool) -> Result<()> {
    // Open the vault (requires password).
    let mut session = login(cli)?;
    let position = entry_position(index)?;
    let label = session.entry(position)?.label();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry {index} '{label}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // Delete the entry and save.
    let removed = session.remove_entry(position)?;
    session.persist()?;

    crate::audit::log_audit(cli, "delete", Some(&removed.platform), None);
    output::success(&format!("Deleted entry '{label}'"));

    Ok(())
}
