//! `passvault list` — display all entries in a table.

use crate::cli::output;
use crate::cli::{login, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = login(cli)?;
    let entries = session.entries();

    output::info(&format!("{} entry(ies)", entries.len()));
    output::print_entries_table(entries);

    Ok(())
}
