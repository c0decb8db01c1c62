//! The fixed content categories inside every folder.

use std::fmt;
use std::path::Path;

/// Subdirectory holding `<title>.txt` notes.
pub const NOTES_DIR: &str = "notes";

/// File extension used for stored notes.
pub const NOTE_EXT: &str = "txt";

/// Binary asset categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Image, AssetKind::Audio];

    /// Subdirectory name inside a folder.
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Audio => "audios",
        }
    }

    /// Plural label used in listings.
    pub fn heading(self) -> &'static str {
        match self {
            AssetKind::Image => "Images",
            AssetKind::Audio => "Audio",
        }
    }

    /// Lowercase file extensions accepted for this category.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AssetKind::Image => &["png", "jpg", "jpeg"],
            AssetKind::Audio => &["wav", "mp3", "ogg"],
        }
    }

    /// Returns the normalized extension if `file_name` is acceptable.
    pub fn accepted_extension(self, file_name: &str) -> Option<String> {
        let ext = Path::new(file_name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        self.extensions().contains(&ext.as_str()).then_some(ext)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Image => f.write_str("image"),
            AssetKind::Audio => f.write_str("audio"),
        }
    }
}

/// Every subdirectory a folder is created with.
pub fn category_dirs() -> [&'static str; 3] {
    [
        NOTES_DIR,
        AssetKind::Image.dir_name(),
        AssetKind::Audio.dir_name(),
    ]
}
