//! Content accessors scoped to one folder.
//!
//! A folder on disk looks like:
//!
//! ```text
//! <folder>/notes/<title>.txt
//! <folder>/images/<filename>
//! <folder>/audios/<filename>
//! ```
//!
//! Nothing is ever overwritten: every write opens its target with
//! create-new semantics and maps `AlreadyExists` to a collision error.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::category::{AssetKind, NOTES_DIR, NOTE_EXT};
use super::names::validate_name;
use crate::errors::{FolderVaultError, Result};

/// Item counts for one folder, used by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSummary {
    pub name: String,
    pub notes: usize,
    pub images: usize,
    pub audio: usize,
}

/// Handle on an existing folder inside the vault.
#[derive(Debug, Clone)]
pub struct Folder {
    name: String,
    path: PathBuf,
}

impl Folder {
    pub(crate) fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    /// Store a new note as `notes/<title>.txt`.
    ///
    /// The body is written byte-for-byte; it must not be blank.
    pub fn add_note(&self, title: &str, body: &str) -> Result<()> {
        let title = validate_name("Note title", title)?;
        if body.trim().is_empty() {
            return Err(FolderVaultError::EmptyInput("Note body"));
        }

        let dir = self.ensure_dir(NOTES_DIR)?;
        let path = dir.join(note_file_name(&title));

        let mut file = create_new(&path)
            .map_err(|e| collision_or_io(e, || FolderVaultError::NoteAlreadyExists(title.clone())))?;
        file.write_all(body.as_bytes())?;

        Ok(())
    }

    /// Titles of every note in this folder, sorted.
    pub fn list_notes(&self) -> Result<Vec<String>> {
        let suffix = format!(".{NOTE_EXT}");
        let titles = list_files(&self.path.join(NOTES_DIR))?
            .into_iter()
            .filter_map(|f| f.strip_suffix(&suffix).map(str::to_string))
            .filter(|t| !t.is_empty())
            .collect();
        Ok(titles)
    }

    /// Read back a note's body exactly as stored.
    pub fn read_note(&self, title: &str) -> Result<String> {
        let title = validate_name("Note title", title)?;
        let path = self.path.join(NOTES_DIR).join(note_file_name(&title));

        match fs::read_to_string(&path) {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FolderVaultError::NoteNotFound(title))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ------------------------------------------------------------------
    // Assets
    // ------------------------------------------------------------------

    /// Copy `source` into the category directory under its own file name.
    ///
    /// Returns the stored file name.
    pub fn add_asset(&self, kind: AssetKind, source: &Path) -> Result<String> {
        let raw_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FolderVaultError::InvalidName {
                name: source.display().to_string(),
                reason: "source has no UTF-8 file name".into(),
            })?;
        let name = validate_name("File name", raw_name)?;
        check_extension(kind, &name)?;

        self.copy_in(kind, source, &name)?;
        Ok(name)
    }

    /// Copy `source` in under a capture-style `<unix-seconds>.<ext>` name.
    ///
    /// Returns the stored file name.
    pub fn add_capture(&self, kind: AssetKind, source: &Path) -> Result<String> {
        let raw_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let ext = check_extension(kind, raw_name)?;
        let name = format!("{}.{ext}", Utc::now().timestamp());

        self.copy_in(kind, source, &name)?;
        Ok(name)
    }

    /// File names stored in a category, sorted. Files with extensions the
    /// category does not accept are skipped.
    pub fn list_assets(&self, kind: AssetKind) -> Result<Vec<String>> {
        let names = list_files(&self.path.join(kind.dir_name()))?
            .into_iter()
            .filter(|n| kind.accepted_extension(n).is_some())
            .collect();
        Ok(names)
    }

    /// Location of a stored asset on disk.
    pub fn asset_path(&self, kind: AssetKind, name: &str) -> Result<PathBuf> {
        let name = validate_name("File name", name)?;
        let path = self.path.join(kind.dir_name()).join(&name);
        if !path.is_file() {
            return Err(FolderVaultError::AssetNotFound {
                category: kind.to_string(),
                name,
            });
        }
        Ok(path)
    }

    /// Copy a stored asset out to `dest`.
    ///
    /// If `dest` is a directory the asset keeps its name inside it.
    /// An existing destination file is never overwritten.
    pub fn export_asset(&self, kind: AssetKind, name: &str, dest: &Path) -> Result<PathBuf> {
        let source = self.asset_path(kind, name)?;
        let target = if dest.is_dir() {
            dest.join(source.file_name().unwrap_or_default())
        } else {
            dest.to_path_buf()
        };

        copy_no_clobber(&source, &target, || {
            FolderVaultError::DestinationExists(target.clone())
        })?;
        Ok(target)
    }

    /// Counts of notes, images and audio clips.
    pub fn summary(&self) -> Result<FolderSummary> {
        Ok(FolderSummary {
            name: self.name.clone(),
            notes: self.list_notes()?.len(),
            images: self.list_assets(AssetKind::Image)?.len(),
            audio: self.list_assets(AssetKind::Audio)?.len(),
        })
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn copy_in(&self, kind: AssetKind, source: &Path, name: &str) -> Result<()> {
        if !source.exists() {
            return Err(FolderVaultError::SourceNotFound(source.to_path_buf()));
        }
        if !source.is_file() {
            return Err(FolderVaultError::InvalidName {
                name: source.display().to_string(),
                reason: "source is not a regular file".into(),
            });
        }

        let dest = self.ensure_dir(kind.dir_name())?.join(name);
        copy_no_clobber(source, &dest, || FolderVaultError::AssetAlreadyExists {
            category: kind.to_string(),
            name: name.to_string(),
        })
    }

    /// Category directories are recreated if someone removed them.
    fn ensure_dir(&self, category: &str) -> Result<PathBuf> {
        if !self.path.is_dir() {
            return Err(FolderVaultError::FolderNotFound(self.name.clone()));
        }
        let dir = self.path.join(category);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

fn note_file_name(title: &str) -> String {
    format!("{title}.{NOTE_EXT}")
}

fn check_extension(kind: AssetKind, name: &str) -> Result<String> {
    kind.accepted_extension(name)
        .ok_or_else(|| FolderVaultError::UnsupportedExtension {
            category: kind.to_string(),
            name: name.to_string(),
            allowed: kind.extensions().join(", "),
        })
}

fn create_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

fn collision_or_io(e: io::Error, collision: impl FnOnce() -> FolderVaultError) -> FolderVaultError {
    if e.kind() == ErrorKind::AlreadyExists {
        collision()
    } else {
        FolderVaultError::Io(e)
    }
}

/// Copy `source` to a not-yet-existing `dest`, removing any partial file
/// if the copy fails midway.
fn copy_no_clobber(
    source: &Path,
    dest: &Path,
    collision: impl FnOnce() -> FolderVaultError,
) -> Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = create_new(dest).map_err(|e| collision_or_io(e, collision))?;

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    if let Err(e) = copied {
        drop(writer);
        let _ = fs::remove_file(dest);
        return Err(e.into());
    }
    Ok(())
}

/// Sorted names of the regular files directly inside `dir`.
/// A missing directory lists as empty.
fn list_files(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with('.') {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
