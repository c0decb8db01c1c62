//! `foldervault audit`: display the audit log.
//!
//! Usage:
//!   foldervault audit               # show last 50 entries
//!   foldervault audit --last 20     # show last 20
//!   foldervault audit --since 7d    # entries from last 7 days

use chrono::{TimeDelta, Utc};

use crate::audit::{AuditEntry, AuditLog, Operation};
use crate::cli::output;
use crate::cli::{load_settings, open_session, vault_root, Cli};
use crate::errors::{FolderVaultError, Result};

/// Execute the `audit` command.
///
/// The log names folders and notes, so it is only shown after login.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let root = vault_root(cli, &settings)?;
    open_session(&root)?;

    let audit = AuditLog::open(&root)
        .ok_or_else(|| FolderVaultError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration like "2w", "7d", "24h", "30m" and
/// return the instant that long ago.
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();
    let invalid = || {
        FolderVaultError::CommandFailed(format!(
            "invalid duration '{input}': use a number followed by w, d, h or m (e.g. 7d)"
        ))
    };

    let unit = input.chars().last().ok_or_else(invalid)?;
    let num: i64 = input[..input.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| invalid())?;

    let duration = match unit {
        'w' => TimeDelta::try_weeks(num),
        'd' => TimeDelta::try_days(num),
        'h' => TimeDelta::try_hours(num),
        'm' => TimeDelta::try_minutes(num),
        _ => return Err(invalid()),
    }
    .ok_or_else(invalid)?;

    Utc::now().checked_sub_signed(duration).ok_or_else(invalid)
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Folder", "Item", "Details"]);

    for entry in entries {
        let time = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let dash = || "-".to_string();

        table.add_row(vec![
            time,
            colorize_operation(entry),
            entry.folder.clone().unwrap_or_else(dash),
            entry.item.clone().unwrap_or_else(dash),
            entry.details.clone().unwrap_or_else(dash),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(entry: &AuditEntry) -> String {
    use console::style;

    let name = entry.operation.as_str();
    match entry.kind() {
        Some(Operation::Init | Operation::FolderCreate) => style(name).green().to_string(),
        Some(Operation::NoteAdd) => style(name).blue().to_string(),
        Some(Operation::ImageAdd | Operation::AudioAdd) => style(name).cyan().to_string(),
        Some(Operation::LoginFailed) => style(name).red().to_string(),
        Some(Operation::Passwd) => style(name).yellow().to_string(),
        Some(Operation::Login) | None => name.to_string(),
    }
}
