//! Choice and message dialog handlers

use crossterm::event::{KeyCode, KeyEvent};

use crate::state::app::App;
use crate::state::mode::Mode;

pub fn handle_choice_mode(app: &mut App, key: KeyEvent) {
    let Mode::Choice { options, focused, .. } = &mut app.mode else {
        return;
    };
    let count = options.len().max(1);

    match key.code {
        KeyCode::Esc => app.mode = Mode::Normal,
        KeyCode::Up | KeyCode::Left | KeyCode::BackTab => {
            *focused = if *focused == 0 { count - 1 } else { *focused - 1 };
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
            *focused = (*focused + 1) % count;
        }
        KeyCode::Home => *focused = 0,
        KeyCode::End => *focused = count - 1,
        KeyCode::Enter => {
            let index = *focused;
            app.choose(index);
        }
        _ => {}
    }
}

/// Info and message dialogs close on Enter, Esc or Space
pub fn handle_dismiss_mode(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.mode = Mode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;
    use std::fs;

    #[test]
    fn test_enter_applies_focused_option() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let mut app = App::new(Config::default());
        app.open_start_path(tmp.path());
        app.navigator.move_end();
        app.select_current();

        app.start_delete();
        handle_choice_mode(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        handle_choice_mode(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let Mode::Choice { focused, .. } = &app.mode else {
            panic!("expected choice");
        };
        assert_eq!(*focused, 0);

        handle_choice_mode(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(matches!(app.take_job(), Some(crate::commands::Job::Delete)));
    }

    #[test]
    fn test_escape_cancels() {
        let mut app = App::new(Config::default());
        app.mode = Mode::message("Error", "boom");
        handle_dismiss_mode(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(matches!(app.mode, Mode::Message { .. }));
        handle_dismiss_mode(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(app.mode, Mode::Normal));
    }
}
