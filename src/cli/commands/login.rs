//! `foldervault login`: check the password without changing anything.

use crate::audit::Operation;
use crate::cli::output;
use crate::cli::{load_settings, open_session, vault_root, Cli};
use crate::errors::Result;

/// Execute the `login` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;

    let session = open_session(&root)?;
    crate::audit::log_audit(&root, Operation::Login, None, None, None);

    let count = session.tree().list_folders()?.len();
    output::success(&format!("Access granted, {count} folder(s) in the vault"));

    Ok(())
}
