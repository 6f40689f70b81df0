//! Input handling
//!
//! This module handles keyboard input dispatching based on the current application mode.

mod dialogs;
mod help;
mod normal;
mod text_field;

pub use text_field::TextField;

use crossterm::event::KeyEvent;

use crate::state::app::App;
use crate::state::mode::Mode;

/// Handle a key event based on current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match &app.mode {
        Mode::Normal => normal::handle_normal_mode(app, key),
        Mode::Help { .. } => {
            let height = app.help_height;
            help::handle_help_mode(app, key, height);
        }
        Mode::Info(_) | Mode::Message { .. } => dialogs::handle_dismiss_mode(app, key),
        Mode::Choice { .. } => dialogs::handle_choice_mode(app, key),
        Mode::FileName { .. } => dialogs::handle_file_name_mode(app, key),
    }
}
