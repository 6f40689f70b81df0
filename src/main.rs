//! safefm - a two-panel terminal file manager
//!
//! The left panel browses directories, the right panel holds the selected
//! files. Commands run over the selection in plain console mode and hand
//! the terminal back to the TUI when done.

use std::io::{self, stdout};
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

mod commands;
mod config;
mod errors;
mod fs;
mod input;
mod logging;
mod safety;
mod selection;
mod state;
mod ui;
mod utils;

use commands::{Console, Job};
use config::Config;
use errors::AppResult;
use state::app::{App, Focus};
use state::mode::{ChoicePurpose, Mode};
use ui::dialog::file_name_cursor_position;
use ui::help::help_text;
use ui::{ChoiceDialog, FileNameDialog, HeaderBar, HelpViewer, InfoDialog, ListingWidget, MessageDialog, SelectionWidget, StatusBar};

/// Set up panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Initialize the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Draw one frame
fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    if let Mode::Help { scroll } = &app.mode {
        let text = help_text(&app.config.keybindings);
        app.help_height = HelpViewer::content_height(size);
        frame.render_widget(HelpViewer::new(&text, *scroll, &app.theme), size);
        return;
    }

    // Header, panels, status line
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
        .split(size);
    let panel_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    frame.render_widget(HeaderBar::new(app.navigator.current_dir(), &app.theme), main_chunks[0]);

    let listing = ListingWidget::new(app.focus == Focus::Listing, &app.selection, &app.theme);
    frame.render_stateful_widget(listing, panel_chunks[0], &mut app.navigator);

    let selected = SelectionWidget::new(app.focus == Focus::Selection, &app.selection, &app.theme);
    frame.render_stateful_widget(selected, panel_chunks[1], &mut app.selection_view);

    let status = StatusBar::new(app.status.as_ref(), app.selection.len(), &app.theme);
    frame.render_widget(status, main_chunks[2]);

    // Dialog overlays
    match &app.mode {
        Mode::Info(info) => frame.render_widget(InfoDialog::new(info, &app.theme), size),
        Mode::Message { title, text } => frame.render_widget(MessageDialog::new(title, text, &app.theme), size),
        Mode::Choice { title, question, options, focused, purpose } => {
            let danger = matches!(purpose, ChoicePurpose::ConfirmMove | ChoicePurpose::ConfirmDelete);
            let dialog = ChoiceDialog::new(title, question, options, *focused, &app.theme).danger(danger);
            frame.render_widget(dialog, size);
        }
        Mode::FileName { input, cursor, encoding, .. } => {
            frame.render_widget(FileNameDialog::new(input, encoding.name(), &app.theme), size);
            if let Some(position) = file_name_cursor_position(size, input, *cursor) {
                frame.set_cursor_position(position);
            }
        }
        Mode::Normal | Mode::Help { .. } => {}
    }
}

/// Run a console job with the TUI suspended
fn run_job(job: &Job, app: &mut App) -> io::Result<()> {
    log::info!("running {:?} over {} selected paths", job, app.selection.len());
    let limits = app.config.reading.limits();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), stdout().lock()).styled();
    commands::run(job, &mut app.selection, limits, &mut console)
}

/// Main event loop
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Queued command: leave the TUI, run it, come back
        if let Some(job) = app.take_job() {
            restore_terminal()?;
            let result = run_job(&job, app);
            *terminal = setup_terminal()?;
            if let Err(e) = result {
                log::error!("console failure: {}", e);
                app.set_error(format!("Console error: {}", e));
            }
            app.finish_job(&job);
            continue;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn main() -> AppResult<()> {
    setup_panic_hook();

    let config = Config::load();
    match logging::init(&config) {
        Ok(Some(path)) => log::info!("safefm {} starting, logging to {}", env!("CARGO_PKG_VERSION"), path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: {}", e),
    }
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }

    // Start at the path given on the command line, then the configured
    // one, then the volume list
    let start_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.general.start_path.as_ref().map(PathBuf::from));

    let mut app = App::new(config);
    if let Some(path) = start_path {
        app.open_start_path(&path);
    }

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app);
    restore_terminal()?;
    result?;

    log::info!("safefm exiting");
    println!("Goodbye!");
    Ok(())
}
