//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::FolderSummary;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of folders with their item counts.
pub fn print_folders_table(folders: &[FolderSummary]) {
    if folders.is_empty() {
        info("No folders in this vault yet.");
        tip("Run `foldervault folder create <NAME>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Folder", "Notes", "Images", "Audio"]);

    for f in folders {
        table.add_row(vec![
            f.name.clone(),
            f.notes.to_string(),
            f.images.to_string(),
            f.audio.to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a titled, bulleted list, or a placeholder when empty.
pub fn print_items(heading: &str, items: &[String]) {
    println!("{} ({})", style(heading).bold(), items.len());
    if items.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for item in items {
        println!("  \u{2022} {item}");
    }
}
