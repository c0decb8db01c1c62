//! `foldervault note`: add, list and read notes.

use std::io::{self, IsTerminal, Read};

use crate::audit::Operation;
use crate::cli::output;
use crate::cli::{load_settings, open_session, vault_root, Cli, NoteAction};
use crate::errors::{FolderVaultError, Result};

/// Execute a `note` subcommand.
pub fn execute(cli: &Cli, action: &NoteAction) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;

    match action {
        NoteAction::Add {
            folder,
            title,
            body,
        } => {
            let mut session = open_session(&root)?;
            let folder = session.enter(folder)?;

            let text = read_body(title, body.as_deref())?;
            folder.add_note(title, &text)?;

            crate::audit::log_audit(&root, Operation::NoteAdd, Some(folder.name()), Some(title.trim()), None);
            output::success(&format!(
                "Note '{}' saved in '{}'",
                title.trim(),
                folder.name()
            ));
        }
        NoteAction::List { folder } => {
            let mut session = open_session(&root)?;
            let folder = session.enter(folder)?;
            output::print_items(&format!("Notes in {}", folder.name()), &folder.list_notes()?);
        }
        NoteAction::Show { folder, title } => {
            let mut session = open_session(&root)?;
            let body = session.enter(folder)?.read_note(title)?;
            print!("{body}");
            if !body.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

/// Determine the note body from one of three sources.
fn read_body(title: &str, inline: Option<&str>) -> Result<String> {
    if let Some(text) = inline {
        // Source 1: --body on the command line.
        return Ok(text.to_string());
    }

    if !io::stdin().is_terminal() {
        // Source 2: piped input.
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    // Source 3: the user's editor.
    output::info(&format!("Opening editor for '{}'...", title.trim()));
    dialoguer::Editor::new()
        .extension(".txt")
        .edit("")
        .map_err(|e| FolderVaultError::CommandFailed(format!("editor: {e}")))?
        .ok_or(FolderVaultError::UserCancelled)
}
