//! `foldervault version`: display version and build details.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("foldervault {current}");
    println!(
        "{}",
        style("Credentials: argon2id (legacy sha256 accepted)").dim()
    );
    Ok(())
}
