//! `foldervault image|audio`: add, list and export binary assets.

use crate::audit::Operation;
use crate::cli::output;
use crate::cli::{load_settings, open_session, vault_root, AssetAction, Cli};
use crate::errors::Result;
use crate::vault::AssetKind;

/// Execute an `image` or `audio` subcommand.
pub fn execute(cli: &Cli, kind: AssetKind, action: &AssetAction) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;
    let mut session = open_session(&root)?;

    match action {
        AssetAction::Add {
            folder,
            file,
            stamp,
        } => {
            let folder = session.enter(folder)?;
            let stored = if *stamp {
                folder.add_capture(kind, file)?
            } else {
                folder.add_asset(kind, file)?
            };

            let detail = format!("from {}", file.display());
            crate::audit::log_audit(&root, Operation::asset_add(kind), Some(folder.name()), Some(&stored), Some(&detail));
            output::success(&format!(
                "Stored {kind} '{stored}' in '{}'",
                folder.name()
            ));
        }
        AssetAction::List { folder } => {
            let folder = session.enter(folder)?;
            let heading = format!("{} in {}", kind.heading(), folder.name());
            output::print_items(&heading, &folder.list_assets(kind)?);
        }
        AssetAction::Export { folder, name, dest } => {
            let folder = session.enter(folder)?;
            let written = folder.export_asset(kind, name, dest)?;
            output::success(&format!("Exported '{name}' to {}", written.display()));
        }
    }

    Ok(())
}
