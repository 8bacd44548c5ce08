//! `passvault generate` — print a strong random password.
//!
//! Needs no master password; nothing is stored.

use crate::cli::{settings, Cli};
use crate::errors::Result;
use crate::policy;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => settings(cli)?.generated_length,
    };

    let password = zeroize::Zeroizing::new(policy::generate(length)?);
    println!("{}", password.as_str());

    Ok(())
}
