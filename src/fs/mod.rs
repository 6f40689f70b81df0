//! Filesystem module

pub mod entry;
pub mod ops;
pub mod utils;

pub use entry::{EntryKind, FileEntry, FileInfo};
pub use ops::read_directory;
