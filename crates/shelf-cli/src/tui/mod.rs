//! Design Bookshelf TUI
//!
//! ## Layout
//!
//! Three-pane layout:
//! - Left: Browse (All Books, Favorites, then each category)
//! - Middle: Books in the current view
//! - Right: Detail (selected book and a summary of the view)
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - h/l or ←/→: Switch focus between panes
//! - Tab: Cycle through panes
//! - Enter: Apply selection / Open purchase link in browser
//! - q: Quit
//!
//! ## Commands
//!
//! - f or Space: Toggle favorite
//! - F: Favorites view
//! - A: All books
//! - i: About
//! - ?: Help

mod app;
mod ui;

use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use shelf_core::{Config, KeyValueStore, Session};

use app::App;

use crate::logging;

/// Run the TUI application
pub fn run(config: &Config) -> Result<()> {
    logging::init_tui_logging(config);

    let session = Session::open(config)?;
    let mut app = App::new(session);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Overlays close on any key
                if app.show_help || app.show_about {
                    app.show_help = false;
                    app.show_about = false;
                    continue;
                }

                handle_key(app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key<S: KeyValueStore>(app: &mut App<S>, code: KeyCode, modifiers: KeyModifiers) {
    // Clear status message on navigation keys
    if matches!(
        code,
        KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('g')
            | KeyCode::Char('G')
    ) {
        app.status_message = None;
    }

    // Clear pending 'g' if timeout expired (500ms)
    if let Some(time) = app.pending_g {
        if time.elapsed() > Duration::from_millis(500) {
            app.pending_g = None;
        }
    }

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.prev_pane(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_pane(),

        KeyCode::Char('g') => {
            if app.pending_g.take().is_some() {
                app.move_to_first();
            } else {
                app.pending_g = Some(std::time::Instant::now());
            }
        }
        KeyCode::Char('G') => app.move_to_last(),

        KeyCode::Enter => app.handle_enter(),

        KeyCode::Char('f') | KeyCode::Char(' ') => app.toggle_current_favorite(),
        KeyCode::Char('F') => app.show_favorites(),
        KeyCode::Char('A') => app.show_all(),
        KeyCode::Char('i') => app.toggle_about(),
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
