//! Ordered set of selected paths

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Paths picked for the next command, in the order they were added.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    paths: IndexSet<PathBuf>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path`. Returns false (and keeps the original position) if it
    /// is already selected.
    pub fn add(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    /// Remove `path`, keeping the order of the rest. Absent paths are ignored.
    pub fn remove(&mut self, path: &Path) -> bool {
        self.paths.shift_remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.paths.get_index(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Snapshot for commands that mutate the selection while iterating
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.paths.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sel: &Selection) -> Vec<&str> {
        sel.iter().map(|p| p.to_str().unwrap()).collect()
    }

    #[test]
    fn test_insertion_order() {
        let mut sel = Selection::new();
        sel.add(PathBuf::from("/b"));
        sel.add(PathBuf::from("/a"));
        sel.add(PathBuf::from("/c"));
        assert_eq!(names(&sel), vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_duplicate_add_keeps_position() {
        let mut sel = Selection::new();
        assert!(sel.add(PathBuf::from("/x")));
        assert!(sel.add(PathBuf::from("/y")));
        assert!(!sel.add(PathBuf::from("/x")));
        assert_eq!(names(&sel), vec!["/x", "/y"]);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut sel = Selection::new();
        for p in ["/1", "/2", "/3", "/4"] {
            sel.add(PathBuf::from(p));
        }
        assert!(sel.remove(Path::new("/2")));
        assert_eq!(names(&sel), vec!["/1", "/3", "/4"]);
        assert_eq!(sel.get(1), Some(&PathBuf::from("/3")));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut sel = Selection::new();
        sel.add(PathBuf::from("/only"));
        assert!(!sel.remove(Path::new("/missing")));
        assert_eq!(names(&sel), vec!["/only"]);
        assert!(sel.contains(Path::new("/only")));
    }
}
