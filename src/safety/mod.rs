//! Error-as-value wrappers around filesystem calls.
//!
//! Every operation in [`io`] returns a [`SafeResult`]. Low-level `io::Error`s
//! are classified into an [`FsError`] right at the call site and never reach
//! the caller as-is. Composition uses the ordinary `map` / `and_then` of
//! `Result`, so a chain stops at the first failure.

pub mod blocks;
pub mod io;
pub mod text;

use thiserror::Error;

/// Result of a single filesystem call.
pub type SafeResult<T> = Result<T, FsError>;

/// Closed taxonomy used for reporting and for branching in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidPath,
    PermissionDenied,
    PathTooLong,
    NotFound,
    Io,
    Unrecognized,
}

/// A classified filesystem failure.
///
/// Messages don't include the path: callers print `path: message`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("invalid path")]
    InvalidPath,

    #[error("permission denied")]
    PermissionDenied,

    #[error("path is too long")]
    PathTooLong,

    #[error("not found")]
    NotFound,

    #[error("not found or not a supported entry type")]
    NotFoundOrUnsupported,

    #[error("source and destination are the same")]
    SameFile,

    #[error("destination already exists")]
    AlreadyExists,

    #[error("file is too large, the rest was skipped")]
    Truncated,

    #[error("{0}")]
    Io(String),

    #[error("unrecognized error: {0}")]
    Unrecognized(String),
}

impl FsError {
    /// Classify an `io::Error`. `action` prefixes generic I/O messages
    /// (e.g. "cannot delete").
    pub fn from_io(err: &std::io::Error, action: &str) -> Self {
        use std::io::ErrorKind;

        if is_name_too_long(err) {
            return FsError::PathTooLong;
        }

        match err.kind() {
            ErrorKind::NotFound => FsError::NotFound,
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => FsError::PermissionDenied,
            ErrorKind::InvalidInput => FsError::InvalidPath,
            ErrorKind::AlreadyExists => FsError::AlreadyExists,
            ErrorKind::IsADirectory
            | ErrorKind::NotADirectory
            | ErrorKind::DirectoryNotEmpty
            | ErrorKind::StorageFull
            | ErrorKind::FileTooLarge
            | ErrorKind::ResourceBusy
            | ErrorKind::CrossesDevices
            | ErrorKind::Interrupted
            | ErrorKind::UnexpectedEof
            | ErrorKind::WriteZero
            | ErrorKind::InvalidData
            | ErrorKind::TimedOut
            | ErrorKind::BrokenPipe
            | ErrorKind::WouldBlock
            | ErrorKind::Unsupported => FsError::Io(format!("{}: {}", action, err)),
            _ => FsError::Unrecognized(err.to_string()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FsError::InvalidPath => ErrorCategory::InvalidPath,
            FsError::PermissionDenied => ErrorCategory::PermissionDenied,
            FsError::PathTooLong => ErrorCategory::PathTooLong,
            FsError::NotFound | FsError::NotFoundOrUnsupported => ErrorCategory::NotFound,
            FsError::SameFile | FsError::AlreadyExists | FsError::Truncated | FsError::Io(_) => {
                ErrorCategory::Io
            }
            FsError::Unrecognized(_) => ErrorCategory::Unrecognized,
        }
    }
}

#[cfg(unix)]
fn is_name_too_long(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(libc::ENAMETOOLONG)
}

#[cfg(windows)]
fn is_name_too_long(err: &std::io::Error) -> bool {
    const ERROR_FILENAME_EXCED_RANGE: i32 = 206;
    err.raw_os_error() == Some(ERROR_FILENAME_EXCED_RANGE)
}

#[cfg(not(any(unix, windows)))]
fn is_name_too_long(_err: &std::io::Error) -> bool {
    false
}
