//! `foldervault passwd`: change the vault password.
//!
//! The new digest is always salted Argon2id, so this also upgrades
//! vaults still carrying a legacy SHA-256 credential.

use crate::audit::Operation;
use crate::cli::output;
use crate::cli::{load_settings, prompt_new_password, prompt_password, vault_root, Cli};
use crate::errors::Result;
use crate::vault::{CredentialStore, DigestAlgorithm};

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;
    let store = CredentialStore::with_params(&root, settings.argon2_params());

    let previous = store.load()?.algorithm;

    output::info("Enter your current vault password.");
    let current = prompt_password()?;

    output::info("Choose your new vault password.");
    let new = prompt_new_password(settings.min_password_len)?;

    store.change_password(current.as_bytes(), new.as_bytes())?;

    let detail = match previous {
        DigestAlgorithm::Sha256 => "upgraded from sha256",
        DigestAlgorithm::Argon2id => "rotated",
    };
    crate::audit::log_audit(&root, Operation::Passwd, None, None, Some(detail));

    output::success(&format!("Password changed ({detail})"));

    Ok(())
}
