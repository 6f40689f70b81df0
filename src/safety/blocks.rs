//! Lazy fixed-size chunking of a decoded text stream.

use std::io::Read;

use super::text::TextReader;
use super::{FsError, SafeResult};

/// Default chunk size in characters.
pub const CHUNK_CHARS: usize = 16 * 1024;

/// Default ceiling: about 100 MB worth of characters.
pub const DEFAULT_LIMIT_CHARS: usize = 100 * 1024 * 1024;

/// One-pass iterator over chunks of a [`TextReader`].
///
/// The reader is borrowed: whoever opened it also closes it, however the
/// iteration ends. After the first `Err` the iterator is exhausted and the
/// stream position is unspecified.
pub struct Blocks<'a, R> {
    reader: &'a mut TextReader<R>,
    chunk_size: usize,
    limit: Option<usize>,
    total: usize,
    done: bool,
}

impl<'a, R: Read> Blocks<'a, R> {
    pub fn new(reader: &'a mut TextReader<R>) -> Self {
        Self {
            reader,
            chunk_size: CHUNK_CHARS,
            limit: None,
            total: 0,
            done: false,
        }
    }

    pub fn with_chunk_size(mut self, chars: usize) -> Self {
        self.chunk_size = chars.max(1);
        self
    }

    /// Stop with [`FsError::Truncated`] once `chars` have been produced and
    /// more data remains. Checked at chunk boundaries.
    pub fn with_limit(mut self, chars: Option<usize>) -> Self {
        self.limit = chars;
        self
    }
}

impl<R: Read> Iterator for Blocks<'_, R> {
    type Item = SafeResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = String::new();
        match self.reader.read_chars(&mut chunk, self.chunk_size) {
            Err(e) => {
                self.done = true;
                Some(Err(FsError::from_io(&e, "cannot read file")))
            }
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) => {
                if let Some(limit) = self.limit
                    && self.total >= limit
                {
                    self.done = true;
                    return Some(Err(FsError::Truncated));
                }
                self.total += n;
                // A short chunk only happens at end of stream
                if n < self.chunk_size {
                    self.done = true;
                }
                Some(Ok(chunk))
            }
        }
    }
}

impl<R: Read> TextReader<R> {
    pub fn blocks(&mut self) -> Blocks<'_, R> {
        Blocks::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use std::io::{self, Cursor};

    fn reader(text: &str) -> TextReader<Cursor<Vec<u8>>> {
        TextReader::new(Cursor::new(text.as_bytes().to_vec()), UTF_8)
    }

    #[test]
    fn test_chunks_reproduce_input() {
        let text: String = "abcdefghij".repeat(7); // 70 chars
        let mut r = reader(&text);
        let chunks: Vec<String> = r
            .blocks()
            .with_chunk_size(16)
            .collect::<SafeResult<Vec<_>>>()
            .unwrap();
        assert_eq!(chunks.len(), 5); // ceil(70 / 16)
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_exact_multiple_ends_without_error() {
        let text = "x".repeat(32);
        let mut r = reader(&text);
        let items: Vec<_> = r.blocks().with_chunk_size(16).collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.is_ok()));
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        let mut r = reader("");
        assert_eq!(r.blocks().count(), 0);
    }

    #[test]
    fn test_limit_truncates() {
        let text = "y".repeat(100);
        let mut r = reader(&text);
        let items: Vec<_> = r.blocks().with_chunk_size(10).with_limit(Some(30)).collect();
        assert_eq!(items.len(), 4);
        assert!(items[..3].iter().all(|item| item.is_ok()));
        assert_eq!(items[3], Err(FsError::Truncated));
    }

    #[test]
    fn test_limit_not_hit_when_stream_ends_at_ceiling() {
        let text = "z".repeat(30);
        let mut r = reader(&text);
        let items: Vec<_> = r.blocks().with_chunk_size(10).with_limit(Some(30)).collect();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item.is_ok()));
    }

    struct FailingRead {
        served: bool,
    }

    impl Read for FailingRead {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
            }
            self.served = true;
            let data = b"0123456789";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn test_read_failure_is_last_element() {
        let mut r = TextReader::new(FailingRead { served: false }, UTF_8);
        let mut blocks = r.blocks().with_chunk_size(4);
        assert_eq!(blocks.next(), Some(Ok("0123".to_string())));
        assert_eq!(blocks.next(), Some(Ok("4567".to_string())));
        assert!(matches!(blocks.next(), Some(Err(FsError::Io(_)))));
        assert_eq!(blocks.next(), None);
    }
}
