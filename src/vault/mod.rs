//! Vault module: on-disk folders of notes, images and audio.
//!
//! This module provides:
//! - The password credential in `password.json` (`credential`)
//! - Folder creation and listing under the vault root (`tree`)
//! - Note and asset accessors for a single folder (`folder`)
//! - An authenticated context carrying the selected folder (`session`)

pub mod category;
pub mod credential;
pub mod folder;
pub mod names;
pub mod session;
pub mod tree;

// Re-export the most commonly used items.
pub use category::AssetKind;
pub use credential::{CredentialRecord, CredentialStore, DigestAlgorithm, CREDENTIAL_FILE};
pub use folder::{Folder, FolderSummary};
pub use session::Session;
pub use tree::VaultTree;
