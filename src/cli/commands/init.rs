//! `passvault init` — set the master password for a new vault.

use crate::cli::output;
use crate::cli::{gatekeeper, prompt_new_password, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let gate = gatekeeper(cli)?;

    // 1. A master password is set exactly once.
    if gate.is_configured() {
        output::tip("Use `passvault add` to store logins in the existing vault.");
        return Err(PassVaultError::AlreadyConfigured);
    }

    // 2. Prompt for a new password (with confirmation and strength check).
    let password = prompt_new_password()?;

    // 3. Write the master password record.
    gate.setup(&password)?;
    output::success(&format!(
        "Master password set ({})",
        gate.store().path().display()
    ));

    // 4. Audit log.
    crate::audit::log_audit(cli, "setup", None, Some("master password set"));

    // 5. Show helpful tips.
    output::tip("Run `passvault add <PLATFORM> <LOGIN>` to store a login.");
    output::tip("Run `passvault generate` to create a strong password.");

    Ok(())
}
