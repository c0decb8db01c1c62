//! An authenticated view of a vault.
//!
//! `Session` is the explicit context handed between commands: it can only
//! be built by a successful login, and it carries the currently selected
//! folder instead of keeping it in global state.

use std::path::Path;

use super::credential::CredentialStore;
use super::folder::Folder;
use super::tree::VaultTree;
use crate::errors::{FolderVaultError, Result};

pub struct Session {
    tree: VaultTree,
    current: Option<Folder>,
}

impl Session {
    /// Verify `password` against the vault at `root` and open a session.
    pub fn login(root: &Path, password: &[u8]) -> Result<Self> {
        let credentials = CredentialStore::new(root);
        if !credentials.verify(password)? {
            return Err(FolderVaultError::WrongPassword);
        }
        Ok(Self {
            tree: VaultTree::new(root),
            current: None,
        })
    }

    pub fn tree(&self) -> &VaultTree {
        &self.tree
    }

    /// Select `name` as the current folder.
    pub fn enter(&mut self, name: &str) -> Result<&Folder> {
        let folder = self.tree.folder(name)?;
        Ok(self.current.insert(folder))
    }

    /// Deselect the current folder.
    pub fn leave(&mut self) {
        self.current = None;
    }

    /// The folder selected with `enter`.
    pub fn current(&self) -> Result<&Folder> {
        self.current.as_ref().ok_or(FolderVaultError::NoFolderSelected)
    }
}
