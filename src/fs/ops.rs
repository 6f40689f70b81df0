//! Filesystem operations

use std::fs;
use std::io;
use std::path::Path;

use super::entry::FileEntry;

/// Read the immediate children of a directory.
///
/// Entries whose metadata can't be read (vanished, permission denied) are
/// skipped; only a failure to open the directory itself is an error.
pub fn read_directory(path: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry_path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                log::debug!("skipping entry of {}: {}", path.display(), e);
                continue;
            }
        };
        match FileEntry::from_path(&entry_path) {
            Ok(file_entry) => entries.push(file_entry),
            Err(e) => log::debug!("skipping {}: {}", entry_path.display(), e),
        }
    }

    Ok(entries)
}
