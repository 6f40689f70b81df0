use encoding_rs::Encoding;

use crate::commands::CreateMode;
use crate::fs::FileInfo;

/// What a choice dialog decides
#[derive(Clone, Debug)]
pub enum ChoicePurpose {
    /// Copy: option 0 keeps existing files, option 1 overwrites them
    CopyOverwrite,
    /// Move: option 0 confirms
    ConfirmMove,
    /// Delete: option 0 confirms
    ConfirmDelete,
    /// Create: concatenate or manual entry. `encoding` is `None` when the
    /// encoding is still to be asked.
    CreateMode {
        encoding: Option<&'static Encoding>,
    },
    /// Pick one of the offered encodings, then continue with `then`
    Encoding {
        encodings: Vec<&'static Encoding>,
        then: AfterEncoding,
    },
}

/// What happens once an encoding is picked
#[derive(Clone, Copy, Debug)]
pub enum AfterEncoding {
    Read,
    Create(CreateMode),
}

/// Application mode
#[derive(Clone, Debug)]
pub enum Mode {
    /// Normal file browsing
    Normal,
    /// Showing help (F1)
    Help {
        scroll: usize,
    },
    /// Properties of an activated file
    Info(FileInfo),
    /// A message with a single OK button
    Message {
        title: String,
        text: String,
    },
    /// A question with a vertical list of answers
    Choice {
        title: String,
        question: String,
        options: Vec<String>,
        /// Highlighted answer
        focused: usize,
        purpose: ChoicePurpose,
    },
    /// Name of the file to create, relative to the current directory
    FileName {
        input: String,
        /// Cursor position in characters
        cursor: usize,
        mode: CreateMode,
        encoding: &'static Encoding,
    },
}

impl Mode {
    pub fn choice(title: &str, question: String, options: &[&str], purpose: ChoicePurpose) -> Self {
        Mode::Choice {
            title: title.to_string(),
            question,
            options: options.iter().map(|s| s.to_string()).collect(),
            focused: 0,
            purpose,
        }
    }

    pub fn message(title: &str, text: impl Into<String>) -> Self {
        Mode::Message {
            title: title.to_string(),
            text: text.into(),
        }
    }
}
