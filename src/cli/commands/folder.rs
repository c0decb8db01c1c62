//! `foldervault folder`: create, list and inspect folders.

use crate::audit::Operation;
use crate::cli::output;
use crate::cli::{load_settings, open_session, vault_root, Cli, FolderAction};
use crate::errors::Result;
use crate::vault::AssetKind;

/// Execute a `folder` subcommand.
pub fn execute(cli: &Cli, action: &FolderAction) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;
    let mut session = open_session(&root)?;

    match action {
        FolderAction::Create { name } => {
            let folder = session.tree().create_folder(name)?;
            crate::audit::log_audit(&root, Operation::FolderCreate, Some(folder.name()), None, None);
            output::success(&format!("Folder '{}' created", folder.name()));
            output::tip(&format!(
                "Run `foldervault note add \"{}\" <TITLE>` to write a note.",
                folder.name()
            ));
        }
        FolderAction::List => {
            let summaries = session.tree().summaries()?;
            output::info(&format!("{} folder(s)", summaries.len()));
            output::print_folders_table(&summaries);
        }
        FolderAction::Show { name } => {
            let folder = session.enter(name)?;
            output::info(&format!("Folder: {}", folder.name()));
            output::print_items("Notes", &folder.list_notes()?);
            for kind in AssetKind::ALL {
                output::print_items(kind.heading(), &folder.list_assets(kind)?);
            }
        }
    }

    Ok(())
}
