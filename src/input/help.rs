//! Help screen key handling

use crossterm::event::{KeyCode, KeyEvent};

use crate::state::app::App;
use crate::state::mode::Mode;
use crate::ui::help::help_text;

pub fn handle_help_mode(app: &mut App, key: KeyEvent, visible_height: usize) {
    let line_count = help_text(&app.config.keybindings).lines().count();
    let max_scroll = line_count.saturating_sub(visible_height);
    let closes = app.key_matches("help", &key);

    let Mode::Help { scroll } = &mut app.mode else {
        return;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.mode = Mode::Normal,
        _ if closes => app.mode = Mode::Normal,
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *scroll = (*scroll + 1).min(max_scroll),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(visible_height),
        KeyCode::PageDown => *scroll = (*scroll + visible_height).min(max_scroll),
        KeyCode::Home | KeyCode::Char('g') => *scroll = 0,
        KeyCode::End | KeyCode::Char('G') => *scroll = max_scroll,
        _ => {}
    }
}
