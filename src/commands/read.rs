//! Streaming selected files to the console

use std::io::{Read, Write};
use std::path::Path;

use encoding_rs::Encoding;

use crate::safety::blocks::Blocks;
use crate::safety::io;
use crate::safety::text::TextReader;
use crate::safety::{FsError, SafeResult};

/// Chunking and ceiling used whenever a file is streamed
#[derive(Clone, Copy, Debug)]
pub struct ReadLimits {
    pub chunk_chars: usize,
    /// `None` reads to the end regardless of size
    pub limit_chars: Option<usize>,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            chunk_chars: crate::safety::blocks::CHUNK_CHARS,
            limit_chars: Some(crate::safety::blocks::DEFAULT_LIMIT_CHARS),
        }
    }
}

/// Feed every block of `reader` to `sink`, stopping at the first failure
/// of either side.
pub fn stream_blocks<R, F>(reader: &mut TextReader<R>, limits: ReadLimits, mut sink: F) -> SafeResult<()>
where
    R: Read,
    F: FnMut(&str) -> SafeResult<()>,
{
    let blocks = Blocks::new(reader)
        .with_chunk_size(limits.chunk_chars)
        .with_limit(limits.limit_chars);
    for block in blocks {
        sink(&block?)?;
    }
    Ok(())
}

/// Resolve, open and stream one file into `out`
pub fn read_into(
    path: &Path,
    encoding: &'static Encoding,
    limits: ReadLimits,
    out: &mut impl Write,
) -> SafeResult<()> {
    let full = io::full_path(path)?;
    let mut reader = io::open_text(&full, encoding)?;
    stream_blocks(&mut reader, limits, |chunk| {
        out.write_all(chunk.as_bytes())
            .map_err(|e| FsError::from_io(&e, "cannot write to console"))
    })
}
