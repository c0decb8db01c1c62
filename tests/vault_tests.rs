//! Integration tests for the FolderVault library: credential, folder tree
//! and content accessors working together on a real directory.

use std::fs;
use std::path::Path;

use foldervault::crypto::{sha256_hex, Argon2Params};
use foldervault::errors::FolderVaultError;
use foldervault::vault::{
    AssetKind, CredentialStore, DigestAlgorithm, Session, VaultTree, CREDENTIAL_FILE,
};
use tempfile::TempDir;

/// Fast Argon2 settings so tests don't spend seconds hashing.
fn fast_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

/// Helper: an initialized vault in a fresh temp dir.
fn initialized_vault(password: &[u8]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    CredentialStore::with_params(dir.path(), fast_params())
        .initialize(password)
        .expect("initialize vault");
    dir
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Credential store
// ---------------------------------------------------------------------------

#[test]
fn initialize_twice_fails() {
    let dir = initialized_vault(b"first-password");
    let store = CredentialStore::with_params(dir.path(), fast_params());

    let err = store.initialize(b"second-password").unwrap_err();
    assert!(matches!(err, FolderVaultError::AlreadyInitialized(_)));
    assert!(err.is_collision());

    // The original credential is untouched.
    assert!(store.verify(b"first-password").unwrap());
}

#[test]
fn verify_accepts_only_the_initialization_password() {
    let dir = initialized_vault(b"open sesame");
    let store = CredentialStore::new(dir.path());

    assert!(store.verify(b"open sesame").unwrap());
    assert!(!store.verify(b"open sesame ").unwrap());
    assert!(!store.verify(b"Open Sesame").unwrap());
    assert!(!store.verify(b"").unwrap());
}

#[test]
fn verify_on_uninitialized_vault_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = CredentialStore::new(dir.path()).verify(b"pw").unwrap_err();
    assert!(matches!(err, FolderVaultError::NotInitialized(_)));
    assert!(err.is_not_found());
}

#[test]
fn salted_digests_differ_for_the_same_password() {
    let a = initialized_vault(b"same");
    let b = initialized_vault(b"same");

    let rec_a = CredentialStore::new(a.path()).load().unwrap();
    let rec_b = CredentialStore::new(b.path()).load().unwrap();
    assert_ne!(rec_a.salt, rec_b.salt);
    assert_ne!(rec_a.password, rec_b.password);
}

#[test]
fn legacy_sha256_credential_verifies() {
    let dir = TempDir::new().unwrap();
    let json = format!(r#"{{"password": "{}"}}"#, sha256_hex(b"1234"));
    fs::write(dir.path().join(CREDENTIAL_FILE), json).unwrap();

    let store = CredentialStore::new(dir.path());
    assert!(store.verify(b"1234").unwrap());
    assert!(!store.verify(b"12345").unwrap());
}

#[test]
fn change_password_upgrades_legacy_credential() {
    let dir = TempDir::new().unwrap();
    let json = format!(r#"{{"password": "{}"}}"#, sha256_hex(b"1234"));
    fs::write(dir.path().join(CREDENTIAL_FILE), json).unwrap();

    let store = CredentialStore::with_params(dir.path(), fast_params());
    store.change_password(b"1234", b"much-better").unwrap();

    let record = store.load().unwrap();
    assert_eq!(record.algorithm, DigestAlgorithm::Argon2id);
    assert!(store.verify(b"much-better").unwrap());
    assert!(!store.verify(b"1234").unwrap());
}

#[test]
fn change_password_requires_current_password() {
    let dir = initialized_vault(b"current");
    let store = CredentialStore::with_params(dir.path(), fast_params());

    let err = store.change_password(b"wrong", b"next").unwrap_err();
    assert!(matches!(err, FolderVaultError::WrongPassword));
    assert!(store.verify(b"current").unwrap());
}

// ---------------------------------------------------------------------------
// Folder tree
// ---------------------------------------------------------------------------

#[test]
fn creating_the_same_folder_twice_collides() {
    let dir = initialized_vault(b"pw");
    let tree = VaultTree::new(dir.path());

    tree.create_folder("Trip").unwrap();
    let err = tree.create_folder("Trip").unwrap_err();
    assert!(matches!(err, FolderVaultError::FolderAlreadyExists(ref n) if n == "Trip"));
}

#[test]
fn empty_folder_name_rejected() {
    let dir = initialized_vault(b"pw");
    let tree = VaultTree::new(dir.path());
    assert!(matches!(
        tree.create_folder("   "),
        Err(FolderVaultError::EmptyInput(_))
    ));
}

#[test]
fn list_folders_returns_exactly_created_folders() {
    let dir = initialized_vault(b"pw");
    let tree = VaultTree::new(dir.path());

    tree.create_folder("B").unwrap();
    tree.create_folder("A").unwrap();

    // password.json sits in the same directory but is not a folder.
    assert!(dir.path().join(CREDENTIAL_FILE).exists());
    assert_eq!(tree.list_folders().unwrap(), vec!["A", "B"]);
}

#[test]
fn summaries_count_each_category() {
    let dir = initialized_vault(b"pw");
    let tree = VaultTree::new(dir.path());
    let folder = tree.create_folder("Trip").unwrap();

    folder.add_note("Ideas", "hello").unwrap();
    let img = write_file(dir.path(), "photo.jpg", b"\xff\xd8\xff");
    folder.add_asset(AssetKind::Image, &img).unwrap();

    let summaries = tree.summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].notes, 1);
    assert_eq!(summaries[0].images, 1);
    assert_eq!(summaries[0].audio, 0);
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[test]
fn note_roundtrip_returns_exact_body() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();

    folder.add_note("Ideas", "hello").unwrap();
    assert_eq!(folder.read_note("Ideas").unwrap(), "hello");
    assert!(folder.path().join("notes").join("Ideas.txt").is_file());
}

#[test]
fn duplicate_note_title_rejected_without_overwrite() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();

    folder.add_note("Ideas", "first").unwrap();
    let err = folder.add_note("Ideas", "second").unwrap_err();
    assert!(matches!(err, FolderVaultError::NoteAlreadyExists(_)));
    assert_eq!(folder.read_note("Ideas").unwrap(), "first");
}

#[test]
fn empty_note_title_rejected() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    assert!(matches!(
        folder.add_note("", "body"),
        Err(FolderVaultError::EmptyInput(_))
    ));
}

#[test]
fn reading_missing_note_fails() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    let err = folder.read_note("Nope").unwrap_err();
    assert!(matches!(err, FolderVaultError::NoteNotFound(_)));
}

#[test]
fn note_title_cannot_escape_folder() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    assert!(matches!(
        folder.add_note("../../password", "x"),
        Err(FolderVaultError::InvalidName { .. })
    ));
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[test]
fn adding_same_asset_twice_collides() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    let src = write_file(dir.path(), "photo.jpg", b"original");

    assert_eq!(folder.add_asset(AssetKind::Image, &src).unwrap(), "photo.jpg");

    fs::write(&src, b"changed").unwrap();
    let err = folder.add_asset(AssetKind::Image, &src).unwrap_err();
    assert!(matches!(err, FolderVaultError::AssetAlreadyExists { .. }));

    // Stored copy keeps the first content.
    let stored = folder.asset_path(AssetKind::Image, "photo.jpg").unwrap();
    assert_eq!(fs::read(stored).unwrap(), b"original");
}

#[test]
fn same_name_allowed_in_different_categories_and_folders() {
    let dir = initialized_vault(b"pw");
    let tree = VaultTree::new(dir.path());
    let a = tree.create_folder("A").unwrap();
    let b = tree.create_folder("B").unwrap();
    let src = write_file(dir.path(), "photo.jpg", b"img");

    a.add_asset(AssetKind::Image, &src).unwrap();
    b.add_asset(AssetKind::Image, &src).unwrap();
    assert_eq!(a.list_assets(AssetKind::Image).unwrap(), vec!["photo.jpg"]);
}

#[test]
fn asset_with_wrong_extension_rejected() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    let src = write_file(dir.path(), "song.mp3", b"ID3");

    assert!(matches!(
        folder.add_asset(AssetKind::Image, &src),
        Err(FolderVaultError::UnsupportedExtension { .. })
    ));
    assert!(folder.add_asset(AssetKind::Audio, &src).is_ok());
}

#[test]
fn missing_source_file_is_not_found() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();

    let err = folder
        .add_asset(AssetKind::Audio, &dir.path().join("ghost.wav"))
        .unwrap_err();
    assert!(matches!(err, FolderVaultError::SourceNotFound(_)));
}

#[test]
fn list_assets_sorted_and_filtered() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    for name in ["b.wav", "a.ogg"] {
        let src = write_file(dir.path(), name, b"x");
        folder.add_asset(AssetKind::Audio, &src).unwrap();
    }
    fs::write(folder.path().join("audios").join("notes.txt"), "x").unwrap();

    assert_eq!(
        folder.list_assets(AssetKind::Audio).unwrap(),
        vec!["a.ogg", "b.wav"]
    );
}

#[test]
fn export_copies_asset_out() {
    let dir = initialized_vault(b"pw");
    let folder = VaultTree::new(dir.path()).create_folder("Trip").unwrap();
    let src = write_file(dir.path(), "memo.wav", b"RIFFdata");
    folder.add_asset(AssetKind::Audio, &src).unwrap();

    let out = TempDir::new().unwrap();
    let written = folder
        .export_asset(AssetKind::Audio, "memo.wav", out.path())
        .unwrap();
    assert_eq!(written, out.path().join("memo.wav"));
    assert_eq!(fs::read(written).unwrap(), b"RIFFdata");
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn session_requires_correct_password() {
    let dir = initialized_vault(b"right");
    assert!(matches!(
        Session::login(dir.path(), b"wrong"),
        Err(FolderVaultError::WrongPassword)
    ));
    assert!(Session::login(dir.path(), b"right").is_ok());
}

#[test]
fn session_tracks_current_folder() {
    let dir = initialized_vault(b"pw");
    let mut session = Session::login(dir.path(), b"pw").unwrap();
    session.tree().create_folder("Trip").unwrap();

    assert!(matches!(
        session.current(),
        Err(FolderVaultError::NoFolderSelected)
    ));

    session.enter("Trip").unwrap().add_note("Ideas", "hello").unwrap();
    assert_eq!(session.current().unwrap().name(), "Trip");
    assert_eq!(session.current().unwrap().read_note("Ideas").unwrap(), "hello");

    session.leave();
    assert!(session.current().is_err());
    assert!(session.enter("Missing").is_err());
}
