use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in FolderVault.
#[derive(Debug, Error)]
pub enum FolderVaultError {
    // --- Input errors ---
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // --- Credential errors ---
    #[error("Vault is already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Vault is not initialized at {0} (run `foldervault init`)")]
    NotInitialized(PathBuf),

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Invalid credential file: {0}")]
    InvalidCredential(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Tree and content errors ---
    #[error("Folder '{0}' already exists")]
    FolderAlreadyExists(String),

    #[error("Folder '{0}' not found")]
    FolderNotFound(String),

    #[error("Note '{0}' already exists in this folder")]
    NoteAlreadyExists(String),

    #[error("Note '{0}' not found")]
    NoteNotFound(String),

    #[error("An {category} named '{name}' already exists")]
    AssetAlreadyExists { category: String, name: String },

    #[error("No {category} named '{name}' in this folder")]
    AssetNotFound { category: String, name: String },

    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Unsupported {category} file '{name}' (allowed: {allowed})")]
    UnsupportedExtension {
        category: String,
        name: String,
        allowed: String,
    },

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("No folder selected")]
    NoFolderSelected,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Audit error: {0}")]
    AuditError(String),
}

impl FolderVaultError {
    /// True for the "already exists" family of errors.
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            Self::AlreadyInitialized(_)
                | Self::FolderAlreadyExists(_)
                | Self::NoteAlreadyExists(_)
                | Self::AssetAlreadyExists { .. }
                | Self::DestinationExists(_)
        )
    }

    /// True for the "not found" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized(_)
                | Self::FolderNotFound(_)
                | Self::NoteNotFound(_)
                | Self::AssetNotFound { .. }
                | Self::SourceNotFound(_)
        )
    }
}

/// Convenience type alias for FolderVault results.
pub type Result<T> = std::result::Result<T, FolderVaultError>;
