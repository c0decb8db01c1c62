//! The vault directory tree: one subdirectory per folder.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::category::category_dirs;
use super::credential::CREDENTIAL_FILE;
use super::folder::{Folder, FolderSummary};
use super::names::validate_name;
use crate::audit::AUDIT_DB_FILE;
use crate::errors::{FolderVaultError, Result};

/// Names that would shadow the vault's own bookkeeping files.
const RESERVED_NAMES: [&str; 2] = [CREDENTIAL_FILE, AUDIT_DB_FILE];

/// Folder-level operations on a vault root.
#[derive(Debug, Clone)]
pub struct VaultTree {
    root: PathBuf,
}

impl VaultTree {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a folder along with its `notes`, `images` and `audios`
    /// subdirectories.
    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        let name = validate_name("Folder name", name)?;
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(FolderVaultError::InvalidName {
                name,
                reason: "reserved by the vault".into(),
            });
        }

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(&name);

        match fs::create_dir(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(FolderVaultError::FolderAlreadyExists(name));
            }
            Err(e) => return Err(e.into()),
        }

        for dir in category_dirs() {
            fs::create_dir(path.join(dir))?;
        }

        Ok(Folder::new(name, path))
    }

    /// Names of every folder in the vault, sorted.
    pub fn list_folders(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') || RESERVED_NAMES.contains(&name.as_str()) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Open an existing folder.
    pub fn folder(&self, name: &str) -> Result<Folder> {
        let name = validate_name("Folder name", name)?;
        let path = self.root.join(&name);
        if RESERVED_NAMES.contains(&name.as_str()) || !path.is_dir() {
            return Err(FolderVaultError::FolderNotFound(name));
        }
        Ok(Folder::new(name, path))
    }

    /// Item counts for every folder, in name order.
    pub fn summaries(&self) -> Result<Vec<FolderSummary>> {
        self.list_folders()?
            .iter()
            .map(|name| self.folder(name)?.summary())
            .collect()
    }
}
