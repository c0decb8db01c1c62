//! Password digests as stored in `password.json`.
//!
//! Two schemes exist:
//! - `Argon2id`: salted, memory-hard; used for every new credential.
//! - `Sha256`: unsalted SHA-256 hex digest written by older vaults.
//!   Still accepted on verify so those vaults can log in and upgrade.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::kdf::{self, Argon2Params};
use crate::errors::Result;

/// Hex-encoded unsalted SHA-256 of the password (legacy scheme).
pub fn sha256_hex(password: &[u8]) -> String {
    hex::encode(Sha256::digest(password))
}

/// Hex-encoded Argon2id digest of the password.
pub fn argon2id_hex(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<String> {
    let digest = kdf::hash_password(password, salt, params)?;
    Ok(hex::encode(digest))
}

/// Compare two hex digests in constant time.
///
/// Comparison is case-insensitive on the hex text, since older files may
/// have been written with uppercase digits.
pub fn digests_match(actual: &str, expected: &str) -> bool {
    let actual = actual.to_ascii_lowercase();
    let expected = expected.to_ascii_lowercase();
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}
