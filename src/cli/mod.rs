//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::audit::Operation;
use crate::config::Settings;
use crate::errors::{FolderVaultError, Result};
use crate::vault::Session;

/// Environment variable consulted before prompting for the password.
pub const PASSWORD_ENV: &str = "FOLDERVAULT_PASSWORD";

/// Environment variable consulted before prompting for a replacement
/// password in `passwd` (falls back to `PASSWORD_ENV` for `init`).
pub const NEW_PASSWORD_ENV: &str = "FOLDERVAULT_NEW_PASSWORD";

/// FolderVault CLI: password-gated folders of notes, images and audio.
#[derive(Parser)]
#[command(
    name = "foldervault",
    about = "Password-gated vault for folders of notes, images and audio",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: `vault_dir` from .foldervault.toml, else vault_data)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the vault password (first run only)
    Init,

    /// Check the vault password
    Login,

    /// Change the vault password
    Passwd,

    /// Create, list and inspect folders
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Add, list and read notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Add, list and export images
    Image {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Add, list and export audio recordings
    Audio {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
        /// Write the script into this directory instead of stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Show version
    Version,
}

/// Folder subcommands.
#[derive(clap::Subcommand)]
pub enum FolderAction {
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
    },

    /// List all folders with item counts
    List,

    /// Show the notes, images and audio in a folder
    Show {
        /// Folder name
        name: String,
    },
}

/// Note subcommands.
#[derive(clap::Subcommand)]
pub enum NoteAction {
    /// Add a note to a folder
    Add {
        /// Folder name
        folder: String,
        /// Note title
        title: String,
        /// Note text (omit to read stdin or open an editor)
        #[arg(short, long)]
        body: Option<String>,
    },

    /// List the notes in a folder
    List {
        /// Folder name
        folder: String,
    },

    /// Print a note
    Show {
        /// Folder name
        folder: String,
        /// Note title
        title: String,
    },
}

/// Shared subcommands for images and audio.
#[derive(clap::Subcommand)]
pub enum AssetAction {
    /// Copy a file into a folder
    Add {
        /// Folder name
        folder: String,
        /// File to copy in
        file: PathBuf,
        /// Store under a capture timestamp name instead of the file's own name
        #[arg(long)]
        stamp: bool,
    },

    /// List the files in a folder
    List {
        /// Folder name
        folder: String,
    },

    /// Copy a stored file out of the vault
    Export {
        /// Folder name
        folder: String,
        /// Stored file name
        name: String,
        /// Destination file or directory
        dest: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.foldervault.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault root: `--vault-dir` wins over the config file.
pub fn vault_root(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault_dir {
        Some(dir) => cwd.join(dir),
        None => settings.vault_root(&cwd),
    })
}

/// Get the vault password, trying in order:
/// 1. `FOLDERVAULT_PASSWORD` env var (scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| FolderVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `init` and `passwd`).
///
/// Also respects `FOLDERVAULT_NEW_PASSWORD`, then `FOLDERVAULT_PASSWORD`,
/// for scripted usage. Enforces the configured minimum password length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    for var in [NEW_PASSWORD_ENV, PASSWORD_ENV] {
        if let Ok(pw) = std::env::var(var) {
            if !pw.is_empty() {
                check_password_len(&pw, min_len)?;
                return Ok(Zeroizing::new(pw));
            }
        }
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose vault password")
                .with_confirmation(
                    "Confirm vault password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| FolderVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if let Err(e) = check_password_len(&password, min_len) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(password);
    }
}

fn check_password_len(password: &str, min_len: usize) -> Result<()> {
    if password.trim().chars().count() < min_len {
        return Err(FolderVaultError::CommandFailed(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Prompt for the password and log in to the vault at `root`.
///
/// Failed attempts are recorded in the audit log before the error is
/// returned.
pub fn open_session(root: &Path) -> Result<Session> {
    let password = prompt_password()?;
    match Session::login(root, password.as_bytes()) {
        Ok(session) => Ok(session),
        Err(e @ FolderVaultError::WrongPassword) => {
            crate::audit::log_audit(root, Operation::LoginFailed, None, None, None);
            Err(e)
        }
        Err(e) => Err(e),
    }
}
