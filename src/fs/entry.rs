//! File entry representation

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// What activating a listing row does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// The synthetic ".." row
    Parent,
    /// A mounted volume or drive (volume list only)
    Volume,
    Directory,
    File,
}

/// A single row of a listing
#[derive(Clone, Debug)]
pub struct FileEntry {
    /// File/directory name (not full path)
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    pub kind: EntryKind,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Last modification time
    pub modified: Option<SystemTime>,
    /// Whether this is a hidden file (starts with '.' on Unix)
    pub is_hidden: bool,
    /// Whether this is a symbolic link
    pub is_symlink: bool,
}

impl FileEntry {
    /// Create a FileEntry from a path
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let is_symlink = metadata.is_symlink();

        // For symlinks, kind and size come from the target
        let target_metadata = if is_symlink {
            fs::metadata(path).ok()
        } else {
            Some(metadata.clone())
        };

        let is_dir = target_metadata.as_ref().is_some_and(|m| m.is_dir());
        let size = if is_dir {
            0
        } else {
            target_metadata.as_ref().map(|m| m.len()).unwrap_or(0)
        };

        #[cfg(windows)]
        let is_hidden = {
            use std::os::windows::fs::MetadataExt;
            const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
            metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
        };
        #[cfg(not(windows))]
        let is_hidden = name.starts_with('.');

        Ok(Self {
            name,
            path: path.to_path_buf(),
            kind: if is_dir { EntryKind::Directory } else { EntryKind::File },
            size,
            modified: metadata.modified().ok(),
            is_hidden,
            is_symlink,
        })
    }

    /// The ".." row. `target` is the parent directory, or the directory
    /// itself at a filesystem root (where ".." leads to the volume list).
    pub fn parent_entry(target: PathBuf) -> Self {
        Self {
            name: "..".to_string(),
            path: target,
            kind: EntryKind::Parent,
            size: 0,
            modified: None,
            is_hidden: false,
            is_symlink: false,
        }
    }

    /// A row of the volume list
    pub fn volume(path: PathBuf) -> Self {
        Self {
            name: path.to_string_lossy().into_owned(),
            path,
            kind: EntryKind::Volume,
            size: 0,
            modified: None,
            is_hidden: false,
            is_symlink: false,
        }
    }

    /// Whether the entry can be added to the selection
    pub fn is_selectable(&self) -> bool {
        matches!(self.kind, EntryKind::Directory | EntryKind::File)
    }
}

/// Read-only properties of a file or directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub readonly: bool,
    /// Extension without the dot, if any
    pub extension: Option<String>,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl FileInfo {
    pub fn from_metadata(path: &Path, metadata: &fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            path: path.to_path_buf(),
            is_dir: metadata.is_dir(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            readonly: metadata.permissions().readonly(),
            extension: path.extension().map(|e| e.to_string_lossy().into_owned()),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
        }
    }
}
