//! `passvault show` — reveal a single entry's password.

use crate::cli::output;
use crate::cli::{entry_position, login, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, index: usize, copy: bool) -> Result<()> {
    let session = login(cli)?;
    let position = entry_position(index)?;

    let entry = session.entry(position)?;
    let secret = session.reveal(entry)?;

    if copy {
        copy_to_clipboard(&secret)?;
        output::success(&format!("Copied password for '{}' to the clipboard", entry.label()));
    } else {
        // Print the bare value so it can be piped.
        println!("{}", secret.as_str());
    }

    Ok(())
}

fn copy_to_clipboard(value: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(value)
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard write failed: {e}")))
}
