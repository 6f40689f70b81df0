use std::fs;
use std::io;
use std::path::Path;

/// Copy modification time and permissions from src to dest.
/// Errors are ignored: the data has already been written.
fn preserve_attributes(src: &Path, dest: &Path) {
    if let Ok(meta) = fs::metadata(src) {
        if let Ok(mtime) = meta.modified() {
            let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
        }
        #[cfg(unix)]
        {
            let _ = fs::set_permissions(dest, meta.permissions());
        }
    }
}

/// Copy a file or directory tree, preserving attributes.
///
/// Directories are merged into an existing destination. Files inside
/// are overwritten only when `overwrite` is set.
pub fn copy_path(src: &Path, dest: &Path, overwrite: bool) -> io::Result<()> {
    if src.is_dir() {
        copy_dir_recursive(src, dest, overwrite)
    } else {
        copy_file(src, dest, overwrite)
    }
}

fn copy_file(src: &Path, dest: &Path, overwrite: bool) -> io::Result<()> {
    if !overwrite && fs::symlink_metadata(dest).is_ok() {
        return Err(io::Error::from(io::ErrorKind::AlreadyExists));
    }
    fs::copy(src, dest)?;
    preserve_attributes(src, dest);
    Ok(())
}

fn copy_dir_recursive(src: &Path, dest: &Path, overwrite: bool) -> io::Result<()> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        // Links inside a tree are recreated, never descended into
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            copy_symlink(&src_path, &dest_path, overwrite)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dest_path, overwrite)?;
        } else {
            copy_file(&src_path, &dest_path, overwrite)?;
        }
    }

    // Last, so creating children doesn't bump the mtime again
    preserve_attributes(src, dest);

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path, overwrite: bool) -> io::Result<()> {
    if let Ok(existing) = fs::symlink_metadata(dest) {
        if !overwrite {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        if existing.is_dir() {
            return Err(io::Error::from(io::ErrorKind::IsADirectory));
        }
        fs::remove_file(dest)?;
    }
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dest: &Path, _overwrite: bool) -> io::Result<()> {
    log::warn!("skipping link {} while copying", src.display());
    Ok(())
}

/// Move a file or directory. Falls back to copy + delete when the
/// destination is on another filesystem.
pub fn move_path(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("rename across devices, copying {}", src.display());
            if cfg!(unix) && fs::symlink_metadata(src)?.file_type().is_symlink() {
                copy_symlink(src, dest, false)?;
            } else {
                copy_path(src, dest, false)?;
            }
            delete_path(src)
        }
        Err(e) => Err(e),
    }
}

/// Delete a file, symlink, or directory tree. Symlinks are removed, never
/// followed.
pub fn delete_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
