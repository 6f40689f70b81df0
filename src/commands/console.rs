//! Line-based console used while the TUI is paused

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

/// Console input and output for a paused-mode job
pub struct Console<R, W> {
    pub input: R,
    pub output: W,
    /// Draw highlighted lines in inverted colors
    styled: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }

    pub fn styled(mut self) -> Self {
        self.styled = true;
        self
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// A line that should stand out (errors, summaries)
    pub fn highlight(&mut self, text: impl Display) -> io::Result<()> {
        if self.styled {
            writeln!(self.output, "{}", text.to_string().black().on_white())
        } else {
            writeln!(self.output, "{}", text)
        }
    }

    /// Next input line without its terminator, `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(&mut self.input)
    }

    /// Print `prompt` and wait for Enter (or end of input)
    pub fn pause(&mut self, prompt: &str) -> io::Result<()> {
        self.line(prompt)?;
        self.output.flush()?;
        self.read_line().map(|_| ())
    }
}

pub fn read_trimmed_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_terminators() {
        let mut input = Cursor::new("one\r\ntwo\nlast");
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("one"));
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("two"));
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_trimmed_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_pause_consumes_one_line() {
        let mut console = Console::new(Cursor::new("\nrest\n"), Vec::new());
        console.pause("Press Enter").unwrap();
        assert_eq!(String::from_utf8(console.output.clone()).unwrap(), "Press Enter\n");
        assert_eq!(console.read_line().unwrap().as_deref(), Some("rest"));
    }
}
