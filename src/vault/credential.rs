//! The single password credential guarding a vault.
//!
//! Stored as `<vault_root>/password.json`:
//!
//! ```text
//! { "password": "<hex digest>", "algorithm": "argon2id",
//!   "salt": "<hex>", "argon2": { "memory_kib": .., "iterations": .., "parallelism": .. },
//!   "created_at": "<rfc3339>" }
//! ```
//!
//! Records without an `algorithm` field are legacy unsalted SHA-256
//! digests. They still verify, and `change_password` rewrites them as
//! Argon2id.
//!
//! Passwords are hashed with surrounding whitespace removed, both when a
//! record is written and when it is checked. Legacy records were produced
//! that way, so a password typed with a stray trailing newline still opens
//! them.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::digest::{argon2id_hex, digests_match, sha256_hex};
use crate::crypto::kdf::{generate_salt, Argon2Params};
use crate::errors::{FolderVaultError, Result};

/// File name of the credential record inside the vault root.
pub const CREDENTIAL_FILE: &str = "password.json";

/// Which digest scheme produced `password`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// Unsalted SHA-256 (legacy records only).
    #[default]
    Sha256,
    /// Salted Argon2id.
    Argon2id,
}

/// On-disk credential record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Hex-encoded password digest.
    pub password: String,

    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Hex-encoded salt (Argon2id only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,

    /// Argon2id parameters used to produce the digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argon2: Option<Argon2Params>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    /// Build a fresh Argon2id record for `password`.
    fn new_argon2id(password: &[u8], params: &Argon2Params) -> Result<Self> {
        let salt = generate_salt();
        let digest = argon2id_hex(trim_password(password), &salt, params)?;
        Ok(Self {
            password: digest,
            algorithm: DigestAlgorithm::Argon2id,
            salt: Some(hex::encode(salt)),
            argon2: Some(*params),
            created_at: Some(Utc::now()),
        })
    }

    /// Digest `password` with this record's scheme and compare.
    fn matches(&self, password: &[u8]) -> Result<bool> {
        let password = trim_password(password);
        let actual = match self.algorithm {
            DigestAlgorithm::Sha256 => sha256_hex(password),
            DigestAlgorithm::Argon2id => {
                let salt_hex = self.salt.as_deref().ok_or_else(|| {
                    FolderVaultError::InvalidCredential("argon2id record has no salt".into())
                })?;
                let salt = hex::decode(salt_hex).map_err(|e| {
                    FolderVaultError::InvalidCredential(format!("salt is not valid hex: {e}"))
                })?;
                let params = self.argon2.unwrap_or_default();
                argon2id_hex(password, &salt, &params)?
            }
        };
        Ok(digests_match(&actual, &self.password))
    }
}

/// Handle on a vault's credential file.
pub struct CredentialStore {
    path: PathBuf,
    params: Argon2Params,
}

impl CredentialStore {
    /// Credential store for the vault rooted at `vault_root`, hashing new
    /// passwords with the default Argon2id parameters.
    pub fn new(vault_root: &Path) -> Self {
        Self::with_params(vault_root, Argon2Params::default())
    }

    /// Like `new`, but new digests use `params`.
    pub fn with_params(vault_root: &Path, params: Argon2Params) -> Self {
        Self {
            path: vault_root.join(CREDENTIAL_FILE),
            params,
        }
    }

    /// Path to `password.json`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a credential has been stored yet.
    pub fn is_initialized(&self) -> bool {
        self.path.is_file()
    }

    /// Store the first credential for this vault.
    ///
    /// Fails if one already exists; the vault root is created if needed.
    pub fn initialize(&self, password: &[u8]) -> Result<()> {
        ensure_password(password)?;
        if self.path.exists() {
            return Err(FolderVaultError::AlreadyInitialized(self.vault_root()));
        }

        let record = CredentialRecord::new_argon2id(password, &self.params)?;
        let bytes = serde_json::to_vec_pretty(&record)
            .map_err(|e| FolderVaultError::SerializationError(format!("credential: {e}")))?;

        fs::create_dir_all(self.vault_root())?;

        // create_new closes the gap between the exists() check and the write.
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(FolderVaultError::AlreadyInitialized(self.vault_root()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&bytes)?;
        file.sync_all()?;
        restrict_permissions(&self.path)?;

        Ok(())
    }

    /// Check `password` against the stored digest.
    ///
    /// `Ok(false)` means the vault exists but the password is wrong.
    pub fn verify(&self, password: &[u8]) -> Result<bool> {
        let record = self.load()?;
        record.matches(password)
    }

    /// Replace the credential after checking the current password.
    ///
    /// The new record is always salted Argon2id, which also upgrades
    /// legacy SHA-256 vaults.
    pub fn change_password(&self, current: &[u8], new: &[u8]) -> Result<()> {
        ensure_password(new)?;
        let old = self.load()?;
        if !old.matches(current)? {
            return Err(FolderVaultError::WrongPassword);
        }

        let mut record = CredentialRecord::new_argon2id(new, &self.params)?;
        record.created_at = old.created_at.or(record.created_at);
        self.write_atomic(&record)
    }

    /// Read and parse `password.json`.
    pub fn load(&self) -> Result<CredentialRecord> {
        if !self.path.exists() {
            return Err(FolderVaultError::NotInitialized(self.vault_root()));
        }
        let contents = fs::read(&self.path)?;
        serde_json::from_slice(&contents)
            .map_err(|e| FolderVaultError::InvalidCredential(format!("{e}")))
    }

    /// Temp file + rename, so a crash never leaves a half-written record.
    fn write_atomic(&self, record: &CredentialRecord) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| FolderVaultError::SerializationError(format!("credential: {e}")))?;

        let tmp_path = self.vault_root().join(format!(".{CREDENTIAL_FILE}.tmp"));
        fs::write(&tmp_path, &bytes)?;
        restrict_permissions(&tmp_path)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn vault_root(&self) -> PathBuf {
        self.path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

fn ensure_password(password: &[u8]) -> Result<()> {
    if trim_password(password).is_empty() {
        return Err(FolderVaultError::EmptyInput("Password"));
    }
    Ok(())
}

fn trim_password(password: &[u8]) -> &[u8] {
    let start = password
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(password.len());
    let end = password
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &password[start..end]
}

/// Owner-only read/write on Unix; no-op elsewhere.
fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> CredentialStore {
        CredentialStore::with_params(
            dir.path(),
            Argon2Params {
                memory_kib: 8_192,
                iterations: 1,
                parallelism: 1,
            },
        )
    }

    #[test]
    fn initialize_writes_argon2id_record() {
        let dir = TempDir::new().unwrap();
        let creds = store(&dir);
        creds.initialize(b"correct horse").unwrap();

        let record = creds.load().unwrap();
        assert_eq!(record.algorithm, DigestAlgorithm::Argon2id);
        assert_eq!(record.password.len(), 64);
        assert_eq!(record.salt.as_deref().map(str::len), Some(64));
        assert!(record.argon2.is_some());
    }

    #[test]
    fn empty_password_rejected() {
        let dir = TempDir::new().unwrap();
        let creds = store(&dir);
        assert!(matches!(
            creds.initialize(b"  "),
            Err(FolderVaultError::EmptyInput(_))
        ));
        assert!(!creds.is_initialized());
    }

    #[test]
    fn legacy_record_without_algorithm_parses_as_sha256() {
        let json = r#"{"password": "abc"}"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.algorithm, DigestAlgorithm::Sha256);
        assert!(record.salt.is_none());
    }

    #[test]
    fn argon2id_record_missing_salt_is_invalid() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CREDENTIAL_FILE),
            r#"{"password": "00", "algorithm": "argon2id"}"#,
        )
        .unwrap();
        let result = store(&dir).verify(b"pw");
        assert!(matches!(result, Err(FolderVaultError::InvalidCredential(_))));
    }

    #[test]
    fn garbage_file_is_invalid_credential() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CREDENTIAL_FILE), "not json").unwrap();
        assert!(matches!(
            store(&dir).load(),
            Err(FolderVaultError::InvalidCredential(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let dir = TempDir::new().unwrap();
        let creds = store(&dir);
        creds.initialize(b"  correct horse\n").unwrap();

        assert!(creds.verify(b"correct horse").unwrap());
        assert!(creds.verify(b"\tcorrect horse ").unwrap());
        assert!(!creds.verify(b"correcthorse").unwrap());
    }

    #[test]
    fn legacy_record_verifies_with_padded_input() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CREDENTIAL_FILE),
            format!(r#"{{"password": "{}"}}"#, sha256_hex(b"1234")),
        )
        .unwrap();

        let creds = store(&dir);
        assert!(creds.verify(b" 1234\n").unwrap());
        assert!(!creds.verify(b"12 34").unwrap());
    }

    #[test]
    fn trim_password_edges() {
        assert_eq!(trim_password(b"  pw \r\n"), b"pw");
        assert_eq!(trim_password(b"a b"), b"a b");
        assert!(trim_password(b" \t ").is_empty());
        assert!(trim_password(b"").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let creds = store(&dir);
        creds.initialize(b"pw").unwrap();

        let mode = fs::metadata(creds.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
