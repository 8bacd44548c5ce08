//! `passvault edit` — change the platform, login, or password of an entry.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{entry_position, login, read_secret_value, require_filled, settings, Cli};
use crate::errors::{PassVaultError, Result};
use crate::policy;

/// Fields to change on an entry; `None` keeps the current value.
pub struct EditRequest<'a> {
    pub platform: Option<&'a str>,
    pub login: Option<&'a str>,
    pub password: bool,
    pub generate: bool,
}

impl EditRequest<'_> {
    fn is_empty(&self) -> bool {
        self.platform.is_none() && self.login.is_none() && !self.password && !self.generate
    }

    /// Names of the changed fields, for the audit log.
    fn changed_fields(&self) -> String {
        let mut fields = Vec::new();
        if self.platform.is_some() {
            fields.push("platform");
        }
        if self.login.is_some() {
            fields.push("login");
        }
        if self.password || self.generate {
            fields.push("password");
        }
        fields.join(", ")
    }
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, index: usize, request: &EditRequest<'_>) -> Result<()> {
    if request.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "nothing to change: pass --platform, --login, --password or --generate".into(),
        ));
    }

    if let Some(platform) = request.platform {
        require_filled("platform", platform)?;
    }
    if let Some(login_name) = request.login {
        require_filled("login", login_name)?;
    }

    let mut session = login(cli)?;
    let position = entry_position(index)?;
    let label = session.entry(position)?.label();

    let new_password: Option<Zeroizing<String>> = if request.generate {
        Some(Zeroizing::new(policy::generate(
            settings(cli)?.generated_length,
        )?))
    } else if request.password {
        let value = read_secret_value(&format!("New password for {label}"))?;
        require_filled("password", &value)?;
        Some(value)
    } else {
        None
    };

    session.update_entry(
        position,
        request.platform,
        request.login,
        new_password.as_ref().map(|p| p.as_str()),
    )?;
    session.persist()?;

    let platform = session.entry(position)?.platform.clone();
    crate::audit::log_audit(
        cli,
        "edit",
        Some(&platform),
        Some(&format!("changed: {}", request.changed_fields())),
    );

    output::success(&format!(
        "Updated entry {index} ({})",
        session.entry(position)?.label()
    ));

    Ok(())
}
