//! `foldervault init`: set the vault password on first run.

use crate::audit::Operation;
use crate::cli::output;
use crate::cli::{load_settings, prompt_new_password, vault_root, Cli};
use crate::errors::{FolderVaultError, Result};
use crate::vault::CredentialStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;
    let store = CredentialStore::with_params(&root, settings.argon2_params());

    // 1. Refuse early, before asking for a password nobody will use.
    if store.is_initialized() {
        output::tip("Use `foldervault passwd` to change the existing password.");
        return Err(FolderVaultError::AlreadyInitialized(root));
    }

    // 2. Prompt for a new password (with confirmation) and store its digest.
    let password = prompt_new_password(settings.min_password_len)?;
    store.initialize(password.as_bytes())?;

    crate::audit::log_audit(&root, Operation::Init, None, None, Some("password set"));

    output::success(&format!("Vault initialized at {}", root.display()));
    output::tip("Run `foldervault folder create <NAME>` to add your first folder.");

    Ok(())
}
