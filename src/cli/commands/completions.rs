//! `foldervault completions`: generate shell completion scripts.
//!
//! Usage:
//!   foldervault completions bash > ~/.bash_completion.d/foldervault
//!   foldervault completions zsh --out-dir ~/.zfunc

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, generate_to, Shell};

use crate::cli::output;
use crate::cli::Cli;
use crate::errors::Result;

const BIN_NAME: &str = "foldervault";

/// Execute the `completions` command.
///
/// Prints the script to stdout unless `out_dir` is given, in which case
/// the script is written there under the shell's conventional file name.
pub fn execute(shell: Shell, out_dir: Option<&Path>) -> Result<()> {
    let mut cmd = Cli::command();
    match out_dir {
        Some(dir) => {
            let path = write_to_dir(shell, dir)?;
            output::success(&format!("Wrote {shell} completions to {}", path.display()));
        }
        None => generate(shell, &mut cmd, BIN_NAME, &mut io::stdout()),
    }
    Ok(())
}

fn write_to_dir(shell: Shell, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let mut cmd = Cli::command();
    Ok(generate_to(shell, &mut cmd, BIN_NAME, dir)?)
}
