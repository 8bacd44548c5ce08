//! `passvault add` — store a new login in the vault.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{login, read_secret_value, require_filled, settings, Cli};
use crate::errors::Result;
use crate::policy;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    platform: &str,
    login_name: &str,
    password: Option<&str>,
    generate: bool,
) -> Result<()> {
    require_filled("platform", platform)?;
    require_filled("login", login_name)?;
    let mut session = login(cli)?;

    // Determine the password from one of four sources.
    let secret = if generate {
        // Source 1: Generated on the spot.
        Zeroizing::new(policy::generate(settings(cli)?.generated_length)?)
    } else if let Some(v) = password {
        // Source 2: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else {
        // Source 3 and 4: Piped input, or the interactive secure prompt.
        read_secret_value(&format!("Password for {platform}"))?
    };

    require_filled("password", &secret)?;

    session.add_entry(platform, login_name, &secret)?;
    session.persist()?;

    crate::audit::log_audit(cli, "add", Some(platform), None);

    let total = session.entries().len();
    output::success(&format!(
        "Added '{platform} - {login_name}' as entry {total} ({total} total)"
    ));
    if generate {
        output::tip(&format!("Run `passvault show {total} --copy` to use the new password."));
    }

    Ok(())
}
