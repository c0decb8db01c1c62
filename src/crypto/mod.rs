//! Cryptographic primitives for FolderVault.
//!
//! This module provides:
//! - Argon2id password hashing (`kdf`)
//! - Hex digests and constant-time comparison for `password.json` (`digest`)

pub mod digest;
pub mod kdf;

pub use digest::{argon2id_hex, digests_match, sha256_hex};
pub use kdf::{generate_salt, hash_password, Argon2Params};
