//! Normal mode key handling

use crossterm::event::KeyEvent;

use crate::state::app::{App, Focus};

pub fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Application
    if app.key_matches("quit", &key) || app.key_matches("quit_letter", &key) {
        app.should_quit = true;
        return;
    }
    if app.key_matches("help", &key) {
        app.show_help();
        return;
    }
    if app.key_matches("refresh", &key) {
        app.refresh();
        return;
    }
    if app.key_matches("toggle_panel", &key) {
        app.toggle_focus();
        return;
    }

    // Cursor movement, in whichever panel has focus
    if app.key_matches("move_up", &key) {
        app.move_up();
        return;
    }
    if app.key_matches("move_down", &key) {
        app.move_down();
        return;
    }
    if app.key_matches("page_up", &key) {
        app.page_up();
        return;
    }
    if app.key_matches("page_down", &key) {
        app.page_down();
        return;
    }
    if app.key_matches("go_home", &key) {
        app.go_home();
        return;
    }
    if app.key_matches("go_end", &key) {
        app.go_end();
        return;
    }

    // Commands (encoding variants first: they are the Shift forms)
    if app.key_matches("read_encoding", &key) {
        app.start_read(true);
        return;
    }
    if app.key_matches("read", &key) {
        app.start_read(false);
        return;
    }
    if app.key_matches("create_encoding", &key) {
        app.start_create(true);
        return;
    }
    if app.key_matches("create", &key) {
        app.start_create(false);
        return;
    }
    if app.key_matches("copy", &key) {
        app.start_copy();
        return;
    }
    if app.key_matches("move", &key) {
        app.start_move();
        return;
    }
    if app.key_matches("delete", &key) {
        app.start_delete();
        return;
    }

    match app.focus {
        Focus::Listing => handle_listing_key(app, key),
        Focus::Selection => handle_selection_key(app, key),
    }
}

/// The listing only adds to the selection
fn handle_listing_key(app: &mut App, key: KeyEvent) {
    if app.key_matches("enter", &key) {
        app.activate();
    } else if app.key_matches("select", &key) {
        app.select_current();
    } else if app.key_matches("volumes", &key) {
        app.go_volumes();
    }
}

/// The selection panel only removes from the selection
fn handle_selection_key(app: &mut App, key: KeyEvent) {
    if app.key_matches("unselect", &key) || app.key_matches("select", &key) || app.key_matches("enter", &key) {
        app.unselect_current();
    }
}
