//! File name dialog handler

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::TextField;
use crate::state::app::App;
use crate::state::mode::Mode;

pub fn handle_file_name_mode(app: &mut App, key: KeyEvent) {
    let Mode::FileName { input, cursor, .. } = &mut app.mode else {
        return;
    };

    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Enter => app.submit_file_name(),
        KeyCode::Backspace => TextField::backspace(input, cursor),
        KeyCode::Delete => TextField::delete(input, *cursor),
        KeyCode::Left => TextField::left(cursor),
        KeyCode::Right => TextField::right(input, cursor),
        KeyCode::Home => TextField::home(cursor),
        KeyCode::End => TextField::end(input, cursor),
        // Separators never belong in a name
        KeyCode::Char('/' | '\\') => {}
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            TextField::insert_char(input, cursor, c);
        }
        _ => {}
    }
}
