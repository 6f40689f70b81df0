//! Creating a file from existing files or from typed lines

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use super::batch::{BatchReport, for_all};
use super::console::read_trimmed_line;
use super::read::{ReadLimits, stream_blocks};
use crate::safety::io as safe_io;
use crate::safety::text::TextWriter;
use crate::safety::{FsError, SafeResult};

/// Consecutive blank lines that end manual entry
pub const BLANK_LINES_TO_END: usize = 3;

/// How a new file gets its content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateMode {
    /// Concatenate the selected files
    Concatenate,
    /// Type the lines in the console
    Manual,
}

/// Lines typed for a new file.
///
/// Blank lines are held back: a run shorter than [`BLANK_LINES_TO_END`]
/// is released when a non-blank line (or end of input) follows, a full
/// run ends the sequence and is dropped. Nothing past the end is read.
pub struct ManualLines<'a, R> {
    input: &'a mut R,
    blanks: usize,
    to_flush: usize,
    held: Option<String>,
    done: bool,
}

impl<'a, R: BufRead> ManualLines<'a, R> {
    pub fn new(input: &'a mut R) -> Self {
        Self {
            input,
            blanks: 0,
            to_flush: 0,
            held: None,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for ManualLines<'_, R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.to_flush > 0 {
            self.to_flush -= 1;
            return Some(Ok(String::new()));
        }
        if let Some(line) = self.held.take() {
            return Some(Ok(line));
        }
        if self.done {
            return None;
        }

        loop {
            match read_trimmed_line(self.input) {
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Ok(None) => {
                    self.done = true;
                    if self.blanks == 0 {
                        return None;
                    }
                    self.to_flush = self.blanks - 1;
                    self.blanks = 0;
                    return Some(Ok(String::new()));
                }
                Ok(Some(line)) if line.is_empty() => {
                    self.blanks += 1;
                    if self.blanks == BLANK_LINES_TO_END {
                        self.done = true;
                        return None;
                    }
                }
                Ok(Some(line)) => {
                    if self.blanks == 0 {
                        return Some(Ok(line));
                    }
                    self.to_flush = self.blanks - 1;
                    self.blanks = 0;
                    self.held = Some(line);
                    return Some(Ok(String::new()));
                }
            }
        }
    }
}

/// Write `lines` to `dest`, aborting on the first failure. Returns the
/// number of lines written.
pub fn write_manual<W, I>(lines: I, dest: &mut TextWriter<W>) -> SafeResult<usize>
where
    W: Write,
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut written = 0;
    for line in lines {
        let line = line.map_err(|e| FsError::from_io(&e, "cannot read input"))?;
        dest.write_line(&line)
            .map_err(|e| FsError::from_io(&e, "cannot write file"))?;
        written += 1;
    }
    dest.flush().map_err(|e| FsError::from_io(&e, "cannot write file"))?;
    Ok(written)
}

/// Stream every source into `dest`. Each source gets its own outcome; a
/// source equal to `dest_path` is refused instead of reading the file
/// being written.
pub fn concat_into<W: Write>(
    sources: &[PathBuf],
    dest_path: &Path,
    dest: &mut TextWriter<W>,
    encoding: &'static Encoding,
    limits: ReadLimits,
) -> BatchReport {
    for_all(sources, "concatenate", |src| {
        let full = safe_io::full_path(src)?;
        if full == dest_path {
            return Err(FsError::SameFile);
        }
        let mut reader = safe_io::open_text(&full, encoding)?;
        stream_blocks(&mut reader, limits, |chunk| {
            dest.write_str(chunk)
                .map_err(|e| FsError::from_io(&e, "cannot write file"))
        })
    })
}
