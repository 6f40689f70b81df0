//! Current location and listing of the browsing panel

use std::path::{Path, PathBuf};

use crate::fs::{EntryKind, FileEntry, FileInfo};
use crate::safety::io;
use crate::safety::{FsError, SafeResult};

/// Where the listing panel is
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The virtual root: a list of volumes, no path
    Volumes,
    /// A resolved absolute directory path
    Directory(PathBuf),
}

/// Result of activating the entry under the cursor
#[derive(Debug)]
pub enum Activation {
    /// The location changed
    Entered,
    /// A file was activated; its properties
    Info(FileInfo),
    /// Empty listing
    Nothing,
}

/// Listing panel state.
///
/// The location only changes through [`Navigator::navigate`], and only
/// when every step of resolving the target succeeds.
pub struct Navigator {
    location: Location,
    /// Display order: ".." first, then sorted children
    entries: Vec<FileEntry>,
    /// Cursor position (index into entries)
    pub cursor: usize,
    /// Scroll offset for display
    pub scroll_offset: usize,
    /// Rows available for the listing, updated during rendering
    pub visible_height: usize,
    /// Last listing failure, shown in place of the entries
    pub error: Option<String>,
    pub show_hidden: bool,
    pub dirs_first: bool,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("location", &self.location)
            .field("entries", &self.entries.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl Navigator {
    /// Start at the volume list
    pub fn new(show_hidden: bool, dirs_first: bool) -> Self {
        let mut nav = Self {
            location: Location::Volumes,
            entries: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20, // Updated on first render
            error: None,
            show_hidden,
            dirs_first,
        };
        if let Err(e) = nav.refresh() {
            log::warn!("cannot list volumes: {}", e);
        }
        nav
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The current directory, `None` at the volume list
    pub fn current_dir(&self) -> Option<&Path> {
        match &self.location {
            Location::Directory(path) => Some(path),
            Location::Volumes => None,
        }
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Entry under the cursor
    pub fn selected(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Go to `target`, or to the volume list for `None` or an empty path.
    ///
    /// On failure the location, listing and working directory are unchanged.
    pub fn navigate(&mut self, target: Option<&Path>) -> SafeResult<()> {
        let Some(target) = target.filter(|t| !t.as_os_str().is_empty()) else {
            log::debug!("navigate: volume list");
            return self.switch_to(Location::Volumes);
        };

        let resolved = io::full_path(target).and_then(|full| {
            io::dir_exists(&full).and_then(|exists| if exists { Ok(full) } else { Err(FsError::NotFound) })
        });
        let result = resolved.and_then(|full| {
            io::directory_info(&full)?;
            let location = Location::Directory(full.clone());
            let entries = self.load(&location)?;
            io::change_dir(&full)?;
            Ok((location, entries))
        });

        match result {
            Ok((location, entries)) => {
                if let Location::Directory(path) = &location {
                    log::info!("navigate: {}", path.display());
                }
                self.commit(location, entries);
                Ok(())
            }
            Err(e) => {
                log::warn!("cannot enter {}: {}", target.display(), e);
                Err(e)
            }
        }
    }

    fn switch_to(&mut self, location: Location) -> SafeResult<()> {
        let entries = self.load(&location)?;
        self.commit(location, entries);
        Ok(())
    }

    fn commit(&mut self, location: Location, entries: Vec<FileEntry>) {
        self.location = location;
        self.entries = entries;
        self.error = None;
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Re-read the current location. On failure the old entries are
    /// dropped and the error is kept for display.
    pub fn refresh(&mut self) -> SafeResult<()> {
        match self.load(&self.location) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
                if self.cursor >= self.entries.len() {
                    self.cursor = self.entries.len().saturating_sub(1);
                }
                self.adjust_scroll();
                Ok(())
            }
            Err(e) => {
                log::warn!("refresh failed: {}", e);
                self.error = Some(e.to_string());
                self.entries.clear();
                self.cursor = 0;
                self.scroll_offset = 0;
                Err(e)
            }
        }
    }

    fn load(&self, location: &Location) -> SafeResult<Vec<FileEntry>> {
        match location {
            Location::Volumes => {
                Ok(io::list_volumes()?.into_iter().map(FileEntry::volume).collect())
            }
            Location::Directory(path) => {
                let mut children = io::list_dir(path)?;
                if !self.show_hidden {
                    children.retain(|e| !e.is_hidden);
                }
                self.sort(&mut children);

                let parent = path.parent().map(Path::to_path_buf).unwrap_or_else(|| path.clone());
                let mut entries = Vec::with_capacity(children.len() + 1);
                entries.push(FileEntry::parent_entry(parent));
                entries.extend(children);
                Ok(entries)
            }
        }
    }

    fn sort(&self, entries: &mut [FileEntry]) {
        let dirs_first = self.dirs_first;
        entries.sort_by(|a, b| {
            let a_dir = a.kind == EntryKind::Directory;
            let b_dir = b.kind == EntryKind::Directory;
            if dirs_first && a_dir != b_dir {
                return b_dir.cmp(&a_dir);
            }
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    /// Activate the entry under the cursor
    pub fn activate(&mut self) -> SafeResult<Activation> {
        let Some(entry) = self.selected() else {
            return Ok(Activation::Nothing);
        };

        match entry.kind {
            EntryKind::Parent => self.go_parent().map(|_| Activation::Entered),
            EntryKind::Directory | EntryKind::Volume => {
                let path = entry.path.clone();
                self.navigate(Some(&path)).map(|_| Activation::Entered)
            }
            EntryKind::File => io::file_info(&entry.path).map(Activation::Info),
        }
    }

    /// Go up one level; from a filesystem root, to the volume list. The
    /// cursor lands on the directory just left.
    pub fn go_parent(&mut self) -> SafeResult<()> {
        let Location::Directory(current) = &self.location else {
            return Ok(());
        };
        let current = current.clone();

        match current.parent() {
            Some(parent) => self.navigate(Some(parent))?,
            None => self.navigate(None)?,
        }

        if let Some(pos) = self.entries.iter().position(|e| e.path == current && e.kind != EntryKind::Parent) {
            self.cursor = pos;
            self.adjust_scroll();
        }
        Ok(())
    }

    /// Ensure scroll offset keeps cursor visible
    fn adjust_scroll(&mut self) {
        let visible = self.visible_height;
        if visible == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor - visible + 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    pub fn page_up(&mut self) {
        let page_size = self.visible_height.max(1);
        self.cursor = self.cursor.saturating_sub(page_size);
        self.adjust_scroll();
    }

    pub fn page_down(&mut self) {
        let page_size = self.visible_height.max(1);
        self.cursor = (self.cursor + page_size).min(self.entries.len().saturating_sub(1));
        self.adjust_scroll();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    pub fn move_end(&mut self) {
        self.cursor = self.entries.len().saturating_sub(1);
        self.adjust_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::ErrorCategory;
    use std::fs;

    fn names(nav: &Navigator) -> Vec<&str> {
        nav.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_starts_at_volume_list() {
        let nav = Navigator::new(true, false);
        assert_eq!(nav.location(), &Location::Volumes);
        assert!(nav.current_dir().is_none());
        assert!(nav.entries().iter().all(|e| e.kind == EntryKind::Volume));
    }

    #[test]
    fn test_navigate_missing_keeps_location() {
        let tmp = tempfile::tempdir().unwrap();
        let mut nav = Navigator::new(true, false);

        let err = nav.navigate(Some(&tmp.path().join("missing"))).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(nav.location(), &Location::Volumes);

        nav.navigate(Some(tmp.path())).unwrap();
        let before = nav.location().clone();
        let err = nav.navigate(Some(&tmp.path().join("missing"))).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(nav.location(), &before);
    }

    #[test]
    fn test_navigate_empty_path_goes_to_volumes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut nav = Navigator::new(true, false);
        nav.navigate(Some(tmp.path())).unwrap();

        nav.navigate(Some(Path::new(""))).unwrap();
        assert_eq!(nav.location(), &Location::Volumes);
        assert!(nav.error.is_none());
    }

    #[test]
    fn test_navigate_to_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let mut nav = Navigator::new(true, false);
        assert_eq!(nav.navigate(Some(&file)), Err(FsError::NotFound));
    }

    #[test]
    fn test_listing_order() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.txt"), "").unwrap();
        fs::write(tmp.path().join("A.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("c")).unwrap();

        let mut nav = Navigator::new(true, false);
        nav.navigate(Some(tmp.path())).unwrap();
        assert_eq!(nav.location(), &Location::Directory(tmp.path().to_path_buf()));
        assert_eq!(names(&nav), vec!["..", "A.txt", "b.txt", "c"]);
        assert_eq!(nav.entries()[0].kind, EntryKind::Parent);

        nav.dirs_first = true;
        nav.refresh().unwrap();
        assert_eq!(names(&nav), vec!["..", "c", "A.txt", "b.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_hidden_entries_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".hidden"), "").unwrap();
        fs::write(tmp.path().join("shown"), "").unwrap();

        let mut nav = Navigator::new(false, false);
        nav.navigate(Some(tmp.path())).unwrap();
        assert_eq!(names(&nav), vec!["..", "shown"]);
    }

    #[test]
    fn test_parent_returns_to_left_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("aaa")).unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let mut nav = Navigator::new(true, false);
        nav.navigate(Some(&tmp.path().join("sub"))).unwrap();
        assert_eq!(nav.cursor, 0);
        assert!(matches!(nav.activate(), Ok(Activation::Entered)));

        assert_eq!(nav.location(), &Location::Directory(tmp.path().to_path_buf()));
        assert_eq!(nav.selected().map(|e| e.name.as_str()), Some("sub"));
    }

    #[test]
    fn test_activate_file_shows_info() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("data.bin"), [0u8; 12]).unwrap();

        let mut nav = Navigator::new(true, false);
        nav.navigate(Some(tmp.path())).unwrap();
        nav.move_down();
        match nav.activate() {
            Ok(Activation::Info(info)) => {
                assert_eq!(info.name, "data.bin");
                assert_eq!(info.size, 12);
                assert_eq!(info.extension.as_deref(), Some("bin"));
            }
            other => panic!("unexpected activation: {:?}", other),
        }
        assert_eq!(nav.location(), &Location::Directory(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_refresh_failure_is_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("gone");
        fs::create_dir(&dir).unwrap();

        let mut nav = Navigator::new(true, false);
        nav.navigate(Some(&dir)).unwrap();
        fs::remove_dir(&dir).unwrap();

        assert!(nav.refresh().is_err());
        assert!(nav.error.is_some());
        assert!(nav.entries().is_empty());
        assert_eq!(nav.location(), &Location::Directory(dir));
    }
}
