//! Operation history for a vault, kept in `<vault_root>/audit.db`.
//!
//! Logging is best-effort. A vault whose database cannot be opened or
//! written keeps working; the event is simply not recorded.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::errors::{FolderVaultError, Result};
use crate::vault::AssetKind;

/// File name of the audit database inside the vault root.
pub const AUDIT_DB_FILE: &str = "audit.db";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS audit_log (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp   TEXT NOT NULL,
    operation   TEXT NOT NULL,
    folder      TEXT,
    item        TEXT,
    details     TEXT
);";

/// Kinds of vault operation that get recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Init,
    Login,
    LoginFailed,
    Passwd,
    FolderCreate,
    NoteAdd,
    ImageAdd,
    AudioAdd,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Init,
        Operation::Login,
        Operation::LoginFailed,
        Operation::Passwd,
        Operation::FolderCreate,
        Operation::NoteAdd,
        Operation::ImageAdd,
        Operation::AudioAdd,
    ];

    /// The add operation for an asset category.
    pub fn asset_add(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Image => Operation::ImageAdd,
            AssetKind::Audio => Operation::AudioAdd,
        }
    }

    /// Name stored in the `operation` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Login => "login",
            Operation::LoginFailed => "login-failed",
            Operation::Passwd => "passwd",
            Operation::FolderCreate => "folder-create",
            Operation::NoteAdd => "note-add",
            Operation::ImageAdd => "image-add",
            Operation::AudioAdd => "audio-add",
        }
    }

    /// Inverse of `as_str`. Unknown names (from a newer build) give `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded event, as it reads back from the database.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    /// Raw operation name; see `Operation::parse`.
    pub operation: String,
    pub folder: Option<String>,
    pub item: Option<String>,
    pub details: Option<String>,
}

impl AuditEntry {
    pub fn kind(&self) -> Option<Operation> {
        Operation::parse(&self.operation)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let raw: String = row.get("timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default();

        Ok(Self {
            id: row.get("id")?,
            timestamp,
            operation: row.get("operation")?,
            folder: row.get("folder")?,
            item: row.get("item")?,
            details: row.get("details")?,
        })
    }
}

/// Connection to a vault's audit database.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open or create the database for the vault at `vault_root`.
    ///
    /// `None` means auditing is unavailable for this vault.
    pub fn open(vault_root: &Path) -> Option<Self> {
        let path = Self::db_path(vault_root);
        let conn = Connection::open(&path).ok()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
        }

        conn.execute_batch(SCHEMA).ok()?;
        Some(Self { conn })
    }

    /// Append an event. Write failures are ignored.
    pub fn record(
        &self,
        op: Operation,
        folder: Option<&str>,
        item: Option<&str>,
        details: Option<&str>,
    ) {
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, folder, item, details)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![Utc::now().to_rfc3339(), op.as_str(), folder, item, details],
        );
    }

    /// Up to `limit` entries, newest first, optionally only those at or
    /// after `since`.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let since = since.map(|ts| ts.to_rfc3339());
        let failed = |e: rusqlite::Error| FolderVaultError::AuditError(e.to_string());

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, folder, item, details
                 FROM audit_log
                 WHERE ?1 IS NULL OR timestamp >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(failed)?;

        let entries = stmt
            .query_map(params![since, limit], AuditEntry::from_row)
            .map_err(failed)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(failed)?;

        Ok(entries)
    }

    pub fn db_path(vault_root: &Path) -> PathBuf {
        vault_root.join(AUDIT_DB_FILE)
    }
}

/// Record one event against the vault at `vault_root`, ignoring failures.
pub fn log_audit(
    vault_root: &Path,
    op: Operation,
    folder: Option<&str>,
    item: Option<&str>,
    details: Option<&str>,
) {
    if let Some(audit) = AuditLog::open(vault_root) {
        audit.record(op, folder, item, details);
    }
}
