//! File operations over the selection.
//!
//! Each operation runs as a [`Job`] while the TUI is paused: output goes to
//! the plain console, one line per processed item, and the job waits for
//! Enter before handing the terminal back.

pub mod batch;
pub mod console;
pub mod create;
pub mod read;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

pub use batch::BatchReport;
pub use console::Console;
pub use create::{CreateMode, ManualLines};
pub use read::ReadLimits;

use crate::safety::io as safe_io;
use crate::selection::Selection;

const RETURN_PROMPT: &str = "Press Enter to return to the file manager.";

/// A console job queued by the UI and run by the main loop
#[derive(Clone, Debug)]
pub enum Job {
    Read {
        encoding: &'static Encoding,
    },
    Copy {
        target: PathBuf,
        overwrite: bool,
    },
    Move {
        target: PathBuf,
    },
    Delete,
    Create {
        mode: CreateMode,
        dest: PathBuf,
        encoding: &'static Encoding,
    },
}

impl Job {
    /// Whether the job can change the filesystem
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Job::Read { .. })
    }
}

/// Run `job` against the console. Items moved or deleted successfully
/// leave the selection. Only console failures are returned; filesystem
/// failures are reported per item.
pub fn run<R: BufRead, W: Write>(
    job: &Job,
    selection: &mut Selection,
    limits: ReadLimits,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let paths = selection.to_vec();

    match job {
        Job::Read { encoding } => {
            run_read(&paths, *encoding, limits, console)?;
        }
        Job::Copy { target, overwrite } => {
            console.line("Copying...")?;
            let report = batch::copy_into(&paths, target, *overwrite);
            print_report(&report, console)?;
            console.pause(RETURN_PROMPT)?;
        }
        Job::Move { target } => {
            console.line("Moving...")?;
            let report = batch::move_into(&paths, target);
            print_report(&report, console)?;
            drop_succeeded(&report, selection);
            console.pause(RETURN_PROMPT)?;
        }
        Job::Delete => {
            console.line("Deleting...")?;
            let report = batch::delete_all(&paths);
            print_report(&report, console)?;
            drop_succeeded(&report, selection);
            console.pause(RETURN_PROMPT)?;
        }
        Job::Create { mode, dest, encoding } => {
            run_create(*mode, dest, *encoding, &paths, limits, console)?;
        }
    }
    Ok(())
}

fn run_read<R: BufRead, W: Write>(
    paths: &[PathBuf],
    encoding: &'static Encoding,
    limits: ReadLimits,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let mut report = BatchReport::default();
    for path in paths {
        let outcome = read::read_into(path, encoding, limits, &mut console.output);
        if let Err(e) = &outcome {
            log::warn!("read {}: {}", path.display(), e);
        }
        report.push(path.clone(), outcome);
    }

    console.line("")?;
    if !report.is_clean() {
        console.highlight("Some files were not read, or not read completely:")?;
        for (path, err) in report.failures() {
            console.highlight(format!("{}: {}", path.display(), err))?;
        }
    }
    console.pause(RETURN_PROMPT)
}

fn run_create<R: BufRead, W: Write>(
    mode: CreateMode,
    dest: &Path,
    encoding: &'static Encoding,
    sources: &[PathBuf],
    limits: ReadLimits,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let opened = safe_io::full_path(dest)
        .and_then(|full| safe_io::create_text(&full, encoding).map(|writer| (full, writer)));
    let (full_dest, mut writer) = match opened {
        Ok(opened) => opened,
        Err(e) => {
            log::warn!("create {}: {}", dest.display(), e);
            console.highlight(format!("Cannot create file: {}", e))?;
            return console.pause(RETURN_PROMPT);
        }
    };

    match mode {
        CreateMode::Concatenate => {
            let report = create::concat_into(sources, &full_dest, &mut writer, encoding, limits);
            print_report(&report, console)?;
            if let Err(e) = writer.flush() {
                console.highlight(format!("{}: cannot write file: {}", dest.display(), e))?;
            }
        }
        CreateMode::Manual => {
            console.line("Type the lines of the file. Press Enter three times in a row to finish.")?;
            console.output.flush()?;
            let lines = ManualLines::new(&mut console.input);
            match create::write_manual(lines, &mut writer) {
                Ok(count) => log::info!("create {}: {} lines", dest.display(), count),
                Err(e) => {
                    log::warn!("create {}: {}", dest.display(), e);
                    console.highlight(format!("Writing stopped: {}", e))?;
                }
            }
        }
    }
    console.pause(RETURN_PROMPT)
}

fn print_report<R: BufRead, W: Write>(report: &BatchReport, console: &mut Console<R, W>) -> io::Result<()> {
    for (path, outcome) in &report.outcomes {
        let text = BatchReport::describe(path, outcome);
        if outcome.is_ok() {
            console.line(text)?;
        } else {
            console.highlight(text)?;
        }
    }
    Ok(())
}

fn drop_succeeded(report: &BatchReport, selection: &mut Selection) {
    for path in report.succeeded() {
        selection.remove(path);
    }
}
