//! Copy, move and delete over a list of paths

use std::path::{Path, PathBuf};

use crate::safety::io;
use crate::safety::{FsError, SafeResult};

/// Per-item outcomes of a command, in the order the items were processed.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(PathBuf, SafeResult<()>)>,
}

impl BatchReport {
    pub fn push(&mut self, path: PathBuf, outcome: SafeResult<()>) {
        self.outcomes.push((path, outcome));
    }

    /// Paths the command finished without error
    pub fn succeeded(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .map(|(path, _)| path.as_path())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &FsError)> {
        self.outcomes
            .iter()
            .filter_map(|(path, outcome)| outcome.as_ref().err().map(|e| (path.as_path(), e)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// "path: OK" or "path: message" for one outcome
    pub fn describe(path: &Path, outcome: &SafeResult<()>) -> String {
        match outcome {
            Ok(()) => format!("{}: OK", path.display()),
            Err(e) => format!("{}: {}", path.display(), e),
        }
    }
}

/// Apply `action` to every path, recording each outcome. Never stops early.
pub fn for_all<F>(paths: &[PathBuf], action: &str, mut f: F) -> BatchReport
where
    F: FnMut(&Path) -> SafeResult<()>,
{
    let mut report = BatchReport::default();
    for path in paths {
        let outcome = f(path);
        match &outcome {
            Ok(()) => log::info!("{} {}: ok", action, path.display()),
            Err(e) => log::warn!("{} {}: {}", action, path.display(), e),
        }
        report.push(path.clone(), outcome);
    }
    report
}

/// Where `source` lands inside `target_dir`
pub fn destination_in(target_dir: &Path, source: &Path) -> SafeResult<PathBuf> {
    source
        .file_name()
        .map(|name| target_dir.join(name))
        .ok_or(FsError::InvalidPath)
}

pub fn copy_into(sources: &[PathBuf], target_dir: &Path, overwrite: bool) -> BatchReport {
    for_all(sources, "copy", |src| {
        destination_in(target_dir, src).and_then(|dst| io::copy_file(src, &dst, overwrite))
    })
}

pub fn move_into(sources: &[PathBuf], target_dir: &Path) -> BatchReport {
    for_all(sources, "move", |src| {
        destination_in(target_dir, src).and_then(|dst| io::move_path(src, &dst))
    })
}

pub fn delete_all(paths: &[PathBuf]) -> BatchReport {
    for_all(paths, "delete", io::delete_recursive)
}
