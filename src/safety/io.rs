//! Filesystem calls that report failures as [`FsError`] values.

use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};

use encoding_rs::Encoding;

use super::text::{TextReader, TextWriter};
use super::{FsError, SafeResult};
use crate::fs::{self as entries, FileEntry, FileInfo, utils};

#[cfg(windows)]
const MAX_PATH_LEN: usize = 32_767;
#[cfg(not(windows))]
const MAX_PATH_LEN: usize = 4096;

/// `Ok(false)` for a missing path or a path that isn't a directory.
pub fn dir_exists(path: &Path) -> SafeResult<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if matches!(
            e.kind(),
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
        ) =>
        {
            Ok(false)
        }
        Err(e) => Err(FsError::from_io(&e, "cannot inspect directory")),
    }
}

/// Absolute, lexically normalized form of `path`. Symlinks are not resolved.
pub fn full_path(path: &Path) -> SafeResult<PathBuf> {
    let raw = path.as_os_str();
    if raw.is_empty() || raw.as_encoded_bytes().contains(&0) {
        return Err(FsError::InvalidPath);
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|e| FsError::from_io(&e, "cannot resolve working directory"))?
            .join(path)
    };

    let normalized = normalize(&absolute);
    if normalized.as_os_str().len() > MAX_PATH_LEN {
        return Err(FsError::PathTooLong);
    }
    Ok(normalized)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Metadata of an existing directory. Anything else is `NotFound`.
pub fn directory_info(path: &Path) -> SafeResult<FileInfo> {
    let meta = fs::metadata(path).map_err(|e| FsError::from_io(&e, "cannot read directory"))?;
    if !meta.is_dir() {
        return Err(FsError::NotFound);
    }
    Ok(FileInfo::from_metadata(path, &meta))
}

pub fn file_info(path: &Path) -> SafeResult<FileInfo> {
    fs::metadata(path)
        .map(|meta| FileInfo::from_metadata(path, &meta))
        .map_err(|e| FsError::from_io(&e, "cannot read file properties"))
}

/// Open a file for decoded reading. The caller owns (and drops) the reader.
pub fn open_text(path: &Path, encoding: &'static Encoding) -> SafeResult<TextReader<File>> {
    let file = File::open(path).map_err(|e| FsError::from_io(&e, "cannot open file"))?;
    let meta = file.metadata().map_err(|e| FsError::from_io(&e, "cannot open file"))?;
    if meta.is_dir() {
        return Err(FsError::NotFoundOrUnsupported);
    }
    Ok(TextReader::new(file, encoding))
}

/// Create (or truncate) a file for encoded writing.
pub fn create_text(
    path: &Path,
    encoding: &'static Encoding,
) -> SafeResult<TextWriter<BufWriter<File>>> {
    File::create(path)
        .map(|file| TextWriter::new(BufWriter::new(file), encoding))
        .map_err(|e| FsError::from_io(&e, "cannot create file"))
}

/// Copy a file, or a directory tree, to `to`.
///
/// Identical paths are rejected before any filesystem access. Directory
/// trees merge into an existing destination; each file inside follows
/// `overwrite`.
pub fn copy_file(from: &Path, to: &Path, overwrite: bool) -> SafeResult<()> {
    let src = full_path(from)?;
    let dst = full_path(to)?;
    if src == dst {
        return Err(FsError::SameFile);
    }

    let meta = fs::metadata(&src).map_err(|e| FsError::from_io(&e, "cannot copy"))?;
    if meta.is_dir() {
        if dst.starts_with(&src) {
            return Err(FsError::Io("cannot copy a directory into itself".to_string()));
        }
    } else if !overwrite && fs::symlink_metadata(&dst).is_ok() {
        return Err(FsError::AlreadyExists);
    }

    utils::copy_path(&src, &dst, overwrite).map_err(|e| FsError::from_io(&e, "cannot copy"))
}

/// Remove a directory tree, a file, or a symlink (not its target).
pub fn delete_recursive(path: &Path) -> SafeResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| lookup_error(&e, "cannot delete"))?;
    let ft = meta.file_type();
    let result = if ft.is_dir() {
        fs::remove_dir_all(path)
    } else if ft.is_file() || ft.is_symlink() {
        fs::remove_file(path)
    } else {
        return Err(FsError::NotFoundOrUnsupported);
    };
    result.map_err(|e| FsError::from_io(&e, "cannot delete"))
}

/// Rename `from` to `to`, copying and deleting when they are on different
/// devices. Never replaces an existing destination.
pub fn move_path(from: &Path, to: &Path) -> SafeResult<()> {
    let src = full_path(from)?;
    let dst = full_path(to)?;

    let meta = fs::symlink_metadata(&src).map_err(|e| lookup_error(&e, "cannot move"))?;
    if src == dst {
        return Err(FsError::SameFile);
    }
    if fs::symlink_metadata(&dst).is_ok() {
        return Err(FsError::AlreadyExists);
    }
    if meta.is_dir() && dst.starts_with(&src) {
        return Err(FsError::Io("cannot move a directory into itself".to_string()));
    }

    utils::move_path(&src, &dst).map_err(|e| FsError::from_io(&e, "cannot move"))
}

/// A missing source is `NotFoundOrUnsupported`; other lookup failures keep
/// their own category.
fn lookup_error(err: &std::io::Error, action: &str) -> FsError {
    match err.kind() {
        std::io::ErrorKind::NotFound => FsError::NotFoundOrUnsupported,
        _ => FsError::from_io(err, action),
    }
}

/// Immediate children of a directory, unsorted.
pub fn list_dir(path: &Path) -> SafeResult<Vec<FileEntry>> {
    entries::read_directory(path).map_err(|e| FsError::from_io(&e, "cannot list directory"))
}

/// Set the process working directory.
pub fn change_dir(path: &Path) -> SafeResult<()> {
    env::set_current_dir(path).map_err(|e| FsError::from_io(&e, "cannot change directory"))
}

/// Roots the volume list shows.
#[cfg(windows)]
pub fn list_volumes() -> SafeResult<Vec<PathBuf>> {
    Ok((b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|root| root.exists())
        .collect())
}

#[cfg(target_os = "linux")]
pub fn list_volumes() -> SafeResult<Vec<PathBuf>> {
    match fs::read_to_string("/proc/self/mounts") {
        Ok(mounts) => Ok(parse_mounts(&mounts)),
        Err(e) => {
            log::debug!("cannot read mount table: {}", e);
            Ok(vec![PathBuf::from("/")])
        }
    }
}

#[cfg(target_os = "macos")]
pub fn list_volumes() -> SafeResult<Vec<PathBuf>> {
    let mut volumes = vec![PathBuf::from("/")];
    if let Ok(dir) = fs::read_dir("/Volumes") {
        let mut mounted: Vec<PathBuf> = dir.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        mounted.sort();
        volumes.extend(mounted);
    }
    Ok(volumes)
}

#[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
pub fn list_volumes() -> SafeResult<Vec<PathBuf>> {
    Ok(vec![PathBuf::from("/")])
}

/// Mount points backed by a device node, plus "/" first.
#[cfg(any(target_os = "linux", test))]
fn parse_mounts(table: &str) -> Vec<PathBuf> {
    let mut points: Vec<PathBuf> = table
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            device
                .starts_with('/')
                .then(|| PathBuf::from(unescape_mount(mount_point)))
        })
        .filter(|p| p != Path::new("/"))
        .collect();
    points.sort();
    points.dedup();
    points.insert(0, PathBuf::from("/"));
    points
}

/// The mount table escapes space, tab, newline and backslash as `\ooo`.
#[cfg(any(target_os = "linux", test))]
fn unescape_mount(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1..i + 4].iter().all(|b| (b'0'..=b'7').contains(b))
        {
            let value = (bytes[i + 1] - b'0') as u32 * 64
                + (bytes[i + 2] - b'0') as u32 * 8
                + (bytes[i + 3] - b'0') as u32;
            if let Ok(byte) = u8::try_from(value) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::ErrorCategory;
    use encoding_rs::UTF_8;

    #[test]
    fn test_full_path_rejects_empty_and_nul() {
        assert_eq!(full_path(Path::new("")), Err(FsError::InvalidPath));
        assert_eq!(full_path(Path::new("a\0b")), Err(FsError::InvalidPath));
    }

    #[test]
    fn test_full_path_normalizes() {
        let root = if cfg!(windows) { "C:\\" } else { "/" };
        let input = Path::new(root).join("a").join(".").join("b").join("..").join("c");
        assert_eq!(full_path(&input).unwrap(), Path::new(root).join("a").join("c"));
    }

    #[test]
    fn test_full_path_too_long() {
        let long = Path::new("/").join("x".repeat(MAX_PATH_LEN + 1));
        assert_eq!(full_path(&long), Err(FsError::PathTooLong));
    }

    #[test]
    fn test_dir_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "").unwrap();
        assert_eq!(dir_exists(tmp.path()), Ok(true));
        assert_eq!(dir_exists(&file), Ok(false));
        assert_eq!(dir_exists(&tmp.path().join("missing")), Ok(false));
    }

    #[test]
    fn test_directory_info_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "").unwrap();
        assert!(directory_info(tmp.path()).unwrap().is_dir);
        assert_eq!(directory_info(&file), Err(FsError::NotFound));
    }

    #[test]
    fn test_copy_onto_itself_is_rejected_without_io() {
        // The path doesn't exist; SameFile must win over NotFound.
        let path = Path::new("/no/such/dir/file.txt");
        assert_eq!(copy_file(path, path, true), Err(FsError::SameFile));
        let dotted = Path::new("/no/such/dir/./file.txt");
        assert_eq!(copy_file(path, dotted, false), Err(FsError::SameFile));
    }

    #[test]
    fn test_copy_respects_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        assert_eq!(copy_file(&src, &dst, false), Err(FsError::AlreadyExists));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "old");

        copy_file(&src, &dst, true).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn test_copy_directory_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("tree");
        fs::create_dir_all(src.join("inner")).unwrap();
        fs::write(src.join("inner/leaf.txt"), "leaf").unwrap();

        let dst = tmp.path().join("copy");
        copy_file(&src, &dst, false).unwrap();
        assert_eq!(fs::read_to_string(dst.join("inner/leaf.txt")).unwrap(), "leaf");

        let nested = src.join("inner/again");
        assert!(matches!(copy_file(&src, &nested, false), Err(FsError::Io(_))));
    }

    #[test]
    fn test_copy_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(&tmp.path().join("nope"), &tmp.path().join("dst"), false).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_delete_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("d");
        fs::create_dir_all(dir.join("x/y")).unwrap();
        fs::write(dir.join("x/y/z.txt"), "z").unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "f").unwrap();

        delete_recursive(&dir).unwrap();
        delete_recursive(&file).unwrap();
        assert!(!dir.exists());
        assert!(!file.exists());
        assert_eq!(delete_recursive(&file), Err(FsError::NotFoundOrUnsupported));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_keeps_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        delete_recursive(&link).unwrap();
        assert!(target.join("keep.txt").exists());
    }

    #[test]
    fn test_move_path() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        fs::write(&src, "data").unwrap();

        move_path(&src, &dst).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "data");

        assert_eq!(move_path(&src, &dst), Err(FsError::NotFoundOrUnsupported));

        fs::write(&src, "again").unwrap();
        assert_eq!(move_path(&src, &dst), Err(FsError::AlreadyExists));
        assert_eq!(move_path(&src, &src), Err(FsError::SameFile));
    }

    #[test]
    fn test_create_then_open_text() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("note.txt");
        fs::write(&path, "previous content that is longer").unwrap();

        let mut writer = create_text(&path, UTF_8).unwrap();
        writer.write_str("short").unwrap();
        writer.flush().unwrap();
        drop(writer);

        let mut reader = open_text(&path, UTF_8).unwrap();
        let mut text = String::new();
        reader.read_chars(&mut text, 100).unwrap();
        assert_eq!(text, "short");
    }

    #[test]
    fn test_open_text_errors() {
        let tmp = tempfile::tempdir().unwrap();
        #[cfg(unix)]
        assert!(matches!(open_text(tmp.path(), UTF_8), Err(FsError::NotFoundOrUnsupported)));
        assert!(matches!(open_text(&tmp.path().join("missing"), UTF_8), Err(FsError::NotFound)));
    }

    #[cfg(unix)]
    #[test]
    fn test_long_component_is_path_too_long() {
        let tmp = tempfile::tempdir().unwrap();
        let long = tmp.path().join("x".repeat(300));
        assert_eq!(delete_recursive(&long), Err(FsError::PathTooLong));
        assert_eq!(move_path(&long, &tmp.path().join("y")), Err(FsError::PathTooLong));
        assert_eq!(copy_file(&long, &tmp.path().join("y"), false), Err(FsError::PathTooLong));
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_through_file_is_not_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        // A regular file used as a directory: ENOTDIR, not a missing entry
        let err = delete_recursive(&file.join("child")).unwrap_err();
        assert_ne!(err, FsError::NotFoundOrUnsupported);
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_list_dir_and_missing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("one"), "1").unwrap();
        fs::create_dir(tmp.path().join("two")).unwrap();
        let mut names: Vec<String> = list_dir(tmp.path()).unwrap().into_iter().map(|e| e.name).collect();
        names.sort();
        assert_eq!(names, vec!["one", "two"]);

        let err = list_dir(&tmp.path().join("missing")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_parse_mounts() {
        let table = "\
sysfs /sys sysfs rw 0 0
/dev/sda1 / ext4 rw 0 0
/dev/sdb1 /mnt/usb\\040stick vfat rw 0 0
tmpfs /tmp tmpfs rw 0 0
/dev/sda2 /home ext4 rw 0 0
";
        assert_eq!(
            parse_mounts(table),
            vec![
                PathBuf::from("/"),
                PathBuf::from("/home"),
                PathBuf::from("/mnt/usb stick"),
            ]
        );
    }

    #[test]
    fn test_unescape_mount_leaves_plain_text() {
        assert_eq!(unescape_mount("/plain"), "/plain");
        assert_eq!(unescape_mount("/a\\134b"), "/a\\b");
        assert_eq!(unescape_mount("/trailing\\"), "/trailing\\");
    }
}
