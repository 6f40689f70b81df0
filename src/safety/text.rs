//! Decoding reader and encoding writer for an explicit text encoding.

use std::io::{self, Read, Write};

use encoding_rs::{CoderResult, Decoder, Encoding, EncoderResult};

const READ_BUF_SIZE: usize = 8 * 1024;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Look up an encoding by WHATWG label ("utf-8", "windows-1251", "koi8-r", ...)
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Reads characters from a byte stream, decoding with a fixed encoding.
///
/// A byte order mark, if present, overrides the configured encoding and is
/// not returned. Malformed sequences decode to U+FFFD.
pub struct TextReader<R> {
    inner: R,
    decoder: Decoder,
    buf: Vec<u8>,
    pending: String,
    pending_chars: usize,
    eof: bool,
}

impl<R: Read> TextReader<R> {
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder(),
            buf: vec![0; READ_BUF_SIZE],
            pending: String::new(),
            pending_chars: 0,
            eof: false,
        }
    }

    /// Append up to `max_chars` characters to `out`.
    ///
    /// Blocks until `max_chars` characters are available or the stream ends,
    /// so a short count means end of stream. Returns the number appended.
    pub fn read_chars(&mut self, out: &mut String, max_chars: usize) -> io::Result<usize> {
        while !self.eof && self.pending_chars < max_chars {
            self.fill()?;
        }

        let (split, taken) = match self.pending.char_indices().nth(max_chars) {
            Some((idx, _)) => (idx, max_chars),
            None => (self.pending.len(), self.pending_chars),
        };
        out.push_str(&self.pending[..split]);
        self.pending.drain(..split);
        self.pending_chars -= taken;
        Ok(taken)
    }

    fn fill(&mut self) -> io::Result<()> {
        let n = loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        let last = n == 0;

        let before = self.pending.len();
        let mut input = &self.buf[..n];
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len() * 3 + 16);
            self.pending.reserve(needed);
            let (result, read, _) = self.decoder.decode_to_string(input, &mut self.pending, last);
            input = &input[read..];
            if let CoderResult::InputEmpty = result {
                break;
            }
        }
        self.pending_chars += self.pending[before..].chars().count();

        if last {
            self.eof = true;
        }
        Ok(())
    }
}

/// Writes text to a byte stream in a fixed encoding.
///
/// UTF-16 labels write UTF-8, which is what `encoding_rs` supports for output.
pub struct TextWriter<W: Write> {
    inner: W,
    encoding: &'static Encoding,
}

impl<W: Write> TextWriter<W> {
    pub fn new(inner: W, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            encoding: encoding.output_encoding(),
        }
    }

    /// Encode and write `text`. A character the encoding cannot represent
    /// fails with `InvalidData` and nothing of `text` is written.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut encoder = self.encoding.new_encoder();
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len() * 4 + 16);
        let mut bytes = vec![0; capacity];
        let (result, _, written) = encoder.encode_from_utf8_without_replacement(text, &mut bytes, true);
        match result {
            EncoderResult::InputEmpty => self.inner.write_all(&bytes[..written]),
            EncoderResult::Unmappable(c) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("'{}' (U+{:04X}) cannot be written in {}", c, c as u32, self.encoding.name()),
            )),
            EncoderResult::OutputFull => Err(io::Error::other("encoder output buffer too small")),
        }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_str(line)?;
        self.write_str(LINE_ENDING)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.inner
    }
}
