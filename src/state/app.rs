//! Application state

use std::path::{Component, Path, PathBuf};

use crossterm::event::KeyEvent;
use encoding_rs::Encoding;

use crate::commands::{CreateMode, Job};
use crate::config::Config;
use crate::safety::{FsError, io as safe_io};
use crate::selection::Selection;
use crate::ui::Theme;

use super::mode::{AfterEncoding, ChoicePurpose, Mode};
use super::navigator::{Activation, Navigator};

/// Which panel receives navigation keys
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    /// Current directory listing (left)
    Listing,
    /// Selected files (right)
    Selection,
}

/// One-line message under the panels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Cursor and scrolling of the selection panel
#[derive(Debug, Default)]
pub struct SelectionCursor {
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Rows available, updated during rendering
    pub visible_height: usize,
}

impl SelectionCursor {
    fn adjust_scroll(&mut self) {
        let visible = self.visible_height;
        if visible == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor - visible + 1;
        }
    }

    /// Keep the cursor inside a list of `len` rows
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.cursor);
        self.adjust_scroll();
    }

    pub fn up(&mut self, rows: usize) {
        self.cursor = self.cursor.saturating_sub(rows);
        self.adjust_scroll();
    }

    pub fn down(&mut self, rows: usize, len: usize) {
        self.cursor = self.cursor.saturating_add(rows).min(len.saturating_sub(1));
        self.adjust_scroll();
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    pub theme: Theme,

    // === Panels ===
    pub navigator: Navigator,
    pub selection: Selection,
    pub selection_view: SelectionCursor,
    pub focus: Focus,
    /// Rows of the help screen, updated during rendering
    pub help_height: usize,

    // === Mode and control ===
    pub mode: Mode,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    /// Console job waiting for the main loop
    pending_job: Option<Job>,
}

impl App {
    /// Check if a key event matches a configurable action or its `_alt` variant.
    #[inline]
    pub fn key_matches(&self, action: &str, key: &KeyEvent) -> bool {
        self.config.keybindings.matches_any(action, key)
    }
}

// ============================================================================
// CORE / CONSTRUCTION
// ============================================================================

impl App {
    pub fn new(config: Config) -> Self {
        let theme = config.theme.build_theme();
        let navigator = Navigator::new(config.general.show_hidden, config.general.dirs_first);
        Self {
            config,
            theme,
            navigator,
            selection: Selection::new(),
            selection_view: SelectionCursor::default(),
            focus: Focus::Listing,
            help_height: 0,
            mode: Mode::Normal,
            status: None,
            should_quit: false,
            pending_job: None,
        }
    }

    /// Open `path` at startup; the volume list stays on failure.
    pub fn open_start_path(&mut self, path: &Path) {
        if let Err(e) = self.navigator.navigate(Some(path)) {
            self.set_error(format!("{}: {}", path.display(), e));
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: false });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: true });
    }

    /// Take the queued console job, if any
    pub fn take_job(&mut self) -> Option<Job> {
        self.pending_job.take()
    }

    fn queue(&mut self, job: Job) {
        log::debug!("queued {:?}", job);
        self.mode = Mode::Normal;
        self.pending_job = Some(job);
    }

    /// Back from the console: reload the listing and report.
    pub fn finish_job(&mut self, job: &Job) {
        self.selection_view.clamp(self.selection.len());
        if !job.is_mutating() {
            return;
        }
        match self.navigator.refresh() {
            Ok(()) => self.set_status(format!("{} finished, {} selected", job_name(job), self.selection.len())),
            Err(e) => self.set_error(format!("Cannot list directory: {}", e)),
        }
    }
}

fn job_name(job: &Job) -> &'static str {
    match job {
        Job::Read { .. } => "Read",
        Job::Copy { .. } => "Copy",
        Job::Move { .. } => "Move",
        Job::Delete => "Delete",
        Job::Create { .. } => "Create",
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

impl App {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Listing => Focus::Selection,
            Focus::Selection => Focus::Listing,
        };
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Listing => self.navigator.move_up(),
            Focus::Selection => self.selection_view.up(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Listing => self.navigator.move_down(),
            Focus::Selection => self.selection_view.down(1, self.selection.len()),
        }
    }

    pub fn page_up(&mut self) {
        match self.focus {
            Focus::Listing => self.navigator.page_up(),
            Focus::Selection => {
                let rows = self.selection_view.visible_height.max(1);
                self.selection_view.up(rows);
            }
        }
    }

    pub fn page_down(&mut self) {
        match self.focus {
            Focus::Listing => self.navigator.page_down(),
            Focus::Selection => {
                let rows = self.selection_view.visible_height.max(1);
                self.selection_view.down(rows, self.selection.len());
            }
        }
    }

    pub fn go_home(&mut self) {
        match self.focus {
            Focus::Listing => self.navigator.move_home(),
            Focus::Selection => self.selection_view.up(usize::MAX),
        }
    }

    pub fn go_end(&mut self) {
        match self.focus {
            Focus::Listing => self.navigator.move_end(),
            Focus::Selection => self.selection_view.down(usize::MAX, self.selection.len()),
        }
    }

    /// Enter a directory, or show the properties of a file
    pub fn activate(&mut self) {
        match self.navigator.activate() {
            Ok(Activation::Entered) => self.status = None,
            Ok(Activation::Info(info)) => self.mode = Mode::Info(info),
            Ok(Activation::Nothing) => {}
            Err(e) => {
                let name = self.navigator.selected().map(|e| e.name.clone()).unwrap_or_default();
                self.set_error(format!("{}: {}", name, e));
            }
        }
    }

    /// Jump to the volume list
    pub fn go_volumes(&mut self) {
        if let Err(e) = self.navigator.navigate(None) {
            self.set_error(format!("Cannot list volumes: {}", e));
        } else {
            self.status = None;
        }
    }

    pub fn refresh(&mut self) {
        match self.navigator.refresh() {
            Ok(()) => self.status = None,
            Err(e) => self.set_error(format!("Cannot list directory: {}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help { scroll: 0 };
    }
}

// ============================================================================
// SELECTION
// ============================================================================

impl App {
    /// Add the listing entry under the cursor and step to the next row
    pub fn select_current(&mut self) {
        let Some(entry) = self.navigator.selected() else {
            return;
        };
        if !entry.is_selectable() {
            return;
        }
        let path = entry.path.clone();
        if self.selection.add(path.clone()) {
            log::debug!("selected {}", path.display());
        }
        self.navigator.move_down();
    }

    /// Remove the selection entry under the cursor
    pub fn unselect_current(&mut self) {
        let Some(path) = self.selection.get(self.selection_view.cursor).cloned() else {
            return;
        };
        if self.selection.remove(&path) {
            log::debug!("unselected {}", path.display());
        }
        self.selection_view.clamp(self.selection.len());
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

impl App {
    /// The current directory if it can still be worked with; otherwise
    /// a message dialog is shown.
    fn check_current_dir(&mut self) -> Option<PathBuf> {
        let checked = match self.navigator.current_dir() {
            Some(dir) => safe_io::directory_info(dir).map(|_| dir.to_path_buf()),
            None => Err(FsError::NotFound),
        };
        match checked {
            Ok(dir) => Some(dir),
            Err(e) => {
                self.mode = Mode::message("Error", format!("Cannot work with the current directory: {}", e));
                None
            }
        }
    }

    fn check_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            self.mode = Mode::message("Nothing selected", "Select files with Insert or Space first.");
            return false;
        }
        true
    }

    fn default_encoding(&self) -> &'static Encoding {
        self.config.encoding.default_encoding()
    }

    fn ask_encoding(&mut self, then: AfterEncoding) {
        let encodings = self.config.encoding.choices();
        let names: Vec<&str> = encodings.iter().map(|e| e.name()).collect();
        self.mode = Mode::choice(
            " Encoding ",
            "Choose an encoding".to_string(),
            &names,
            ChoicePurpose::Encoding { encodings, then },
        );
    }

    /// Read the selected files; with `choose_encoding` the encoding is asked first
    pub fn start_read(&mut self, choose_encoding: bool) {
        if !self.check_selection() {
            return;
        }
        if choose_encoding {
            self.ask_encoding(AfterEncoding::Read);
        } else {
            let encoding = self.default_encoding();
            self.queue(Job::Read { encoding });
        }
    }

    pub fn start_create(&mut self, choose_encoding: bool) {
        if self.check_current_dir().is_none() {
            return;
        }
        let encoding = if choose_encoding { None } else { Some(self.default_encoding()) };
        self.mode = Mode::choice(
            " Create ",
            "How do you want to create the file?".to_string(),
            &["Concatenate selected files", "Type it in"],
            ChoicePurpose::CreateMode { encoding },
        );
    }

    pub fn start_copy(&mut self) {
        if !self.check_selection() || self.check_current_dir().is_none() {
            return;
        }
        self.mode = Mode::choice(
            " Copy ",
            "How should existing files be treated?".to_string(),
            &["Don't overwrite", "Overwrite"],
            ChoicePurpose::CopyOverwrite,
        );
    }

    pub fn start_move(&mut self) {
        if !self.check_selection() || self.check_current_dir().is_none() {
            return;
        }
        let question = format!("Really move {} objects?", self.selection.len());
        self.mode = Mode::choice(" Move ", question, &["Yes", "No"], ChoicePurpose::ConfirmMove);
    }

    pub fn start_delete(&mut self) {
        if !self.check_selection() {
            return;
        }
        let question = format!("Really delete {} objects?", self.selection.len());
        self.mode = Mode::choice(" Delete ", question, &["Yes", "No"], ChoicePurpose::ConfirmDelete);
    }

    /// Apply answer `index` of the open choice dialog
    pub fn choose(&mut self, index: usize) {
        let purpose = match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Choice { purpose, .. } => purpose,
            other => {
                self.mode = other;
                return;
            }
        };

        match purpose {
            ChoicePurpose::CopyOverwrite => {
                if let Some(target) = self.check_current_dir() {
                    self.queue(Job::Copy { target, overwrite: index == 1 });
                }
            }
            ChoicePurpose::ConfirmMove => {
                if index == 0
                    && let Some(target) = self.check_current_dir()
                {
                    self.queue(Job::Move { target });
                }
            }
            ChoicePurpose::ConfirmDelete => {
                if index == 0 {
                    self.queue(Job::Delete);
                }
            }
            ChoicePurpose::CreateMode { encoding } => {
                let mode = if index == 0 { CreateMode::Concatenate } else { CreateMode::Manual };
                match encoding {
                    Some(encoding) => self.ask_file_name(mode, encoding),
                    None => self.ask_encoding(AfterEncoding::Create(mode)),
                }
            }
            ChoicePurpose::Encoding { encodings, then } => {
                let Some(&encoding) = encodings.get(index) else {
                    return;
                };
                match then {
                    AfterEncoding::Read => self.queue(Job::Read { encoding }),
                    AfterEncoding::Create(mode) => self.ask_file_name(mode, encoding),
                }
            }
        }
    }

    fn ask_file_name(&mut self, mode: CreateMode, encoding: &'static Encoding) {
        self.mode = Mode::FileName {
            input: String::new(),
            cursor: 0,
            mode,
            encoding,
        };
    }

    /// Queue creation of the file named in the open file name dialog.
    /// An empty name keeps the dialog open.
    pub fn submit_file_name(&mut self) {
        let Mode::FileName { input, mode, encoding, .. } = &self.mode else {
            return;
        };
        let name = input.trim();
        if name.is_empty() {
            return;
        }
        if !is_plain_file_name(name) {
            let message = format!("Not a file name: {}", name);
            self.set_error(message);
            return;
        }
        let (name, mode, encoding) = (PathBuf::from(name), *mode, *encoding);

        let Some(dir) = self.check_current_dir() else {
            return;
        };
        self.queue(Job::Create { mode, dest: dir.join(name), encoding });
    }
}

/// A single name that stays inside the directory it is joined to
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1251};
    use std::fs;

    fn app_in(dir: &Path) -> App {
        let mut app = App::new(Config::default());
        app.open_start_path(dir);
        app
    }

    fn select_named(app: &mut App, name: &str) {
        let pos = app.navigator.entries().iter().position(|e| e.name == name).unwrap();
        app.navigator.cursor = pos;
        app.select_current();
    }

    #[test]
    fn test_select_adds_and_advances() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        let mut app = app_in(tmp.path());

        select_named(&mut app, "a.txt");
        assert_eq!(app.navigator.selected().unwrap().name, "b.txt");
        select_named(&mut app, "a.txt");
        assert_eq!(app.selection.len(), 1);
    }

    #[test]
    fn test_parent_entry_is_not_selectable() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app_in(tmp.path());
        app.navigator.cursor = 0;
        app.select_current();
        assert!(app.selection.is_empty());
    }

    #[test]
    fn test_unselect_from_selection_panel() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        let mut app = app_in(tmp.path());
        select_named(&mut app, "a.txt");
        select_named(&mut app, "b.txt");

        app.toggle_focus();
        app.go_end();
        app.unselect_current();
        assert_eq!(app.selection.to_vec(), vec![tmp.path().join("a.txt")]);
        assert_eq!(app.selection_view.cursor, 0);
    }

    #[test]
    fn test_read_without_selection_shows_message() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app_in(tmp.path());
        app.start_read(false);
        assert!(matches!(app.mode, Mode::Message { .. }));
        assert!(app.take_job().is_none());
    }

    #[test]
    fn test_read_with_chosen_encoding() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let mut app = app_in(tmp.path());
        app.config.encoding.choices = vec!["windows-1251".to_string()];
        select_named(&mut app, "a.txt");

        app.start_read(true);
        let Mode::Choice { options, .. } = &app.mode else {
            panic!("expected encoding choice");
        };
        assert_eq!(options[0], "UTF-8");
        let index = options.iter().position(|o| o == "windows-1251").unwrap();
        app.choose(index);
        assert!(matches!(app.take_job(), Some(Job::Read { encoding }) if encoding == WINDOWS_1251));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn test_copy_choice_sets_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let mut app = app_in(tmp.path());
        select_named(&mut app, "a.txt");

        app.start_copy();
        app.choose(1);
        match app.take_job() {
            Some(Job::Copy { target, overwrite }) => {
                assert!(overwrite);
                assert_eq!(target, crate::safety::io::full_path(tmp.path()).unwrap());
            }
            other => panic!("unexpected job {:?}", other),
        }
    }

    #[test]
    fn test_declined_delete_queues_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let mut app = app_in(tmp.path());
        select_named(&mut app, "a.txt");

        app.start_delete();
        app.choose(1);
        assert!(app.take_job().is_none());
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn test_create_flow_asks_mode_then_name() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app_in(tmp.path());

        app.start_create(false);
        app.choose(1);
        let Mode::FileName { input, .. } = &mut app.mode else {
            panic!("expected file name dialog");
        };
        input.push_str("  ");
        app.submit_file_name();
        assert!(matches!(app.mode, Mode::FileName { .. }));

        if let Mode::FileName { input, .. } = &mut app.mode {
            *input = "new.txt".to_string();
        }
        app.submit_file_name();
        match app.take_job() {
            Some(Job::Create { mode, dest, encoding }) => {
                assert_eq!(mode, CreateMode::Manual);
                assert_eq!(encoding, UTF_8);
                assert!(dest.ends_with("new.txt"));
            }
            other => panic!("unexpected job {:?}", other),
        }
    }

    #[test]
    fn test_file_name_must_stay_in_current_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app_in(tmp.path());
        app.start_create(false);
        app.choose(1);

        for name in ["/abs/x", "a/b", "..", ".", "a\\b"] {
            if let Mode::FileName { input, .. } = &mut app.mode {
                *input = name.to_string();
            }
            app.submit_file_name();
            assert!(app.take_job().is_none(), "{} was accepted", name);
            assert!(matches!(app.mode, Mode::FileName { .. }));
            assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        }
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("notes.txt"));
        assert!(is_plain_file_name("..hidden"));
        assert!(!is_plain_file_name("dir/notes.txt"));
        assert!(!is_plain_file_name("/etc/passwd"));
        assert!(!is_plain_file_name(".."));
    }

    #[test]
    fn test_create_at_volume_list_is_refused() {
        let mut app = App::new(Config::default());
        app.go_volumes();
        app.start_create(false);
        let Mode::Message { text, .. } = &app.mode else {
            panic!("expected message");
        };
        assert!(text.starts_with("Cannot work with the current directory"));
    }

    #[test]
    fn test_missing_start_path_reports_error() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app_in(&tmp.path().join("missing"));
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert!(app.navigator.current_dir().is_none());
    }
}
