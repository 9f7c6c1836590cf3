//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Two key maps exist, chosen
//! by the app's input mode: normal keys drive the list and filters, and the
//! search prompt captures everything printable until it is committed or
//! cancelled.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_normal_key`] that calls it.
//! 3. Update the help text in [`crate::ui`]'s status bar.
//! 4. Update the keybindings table in `README.md`.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, InputMode};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.  `now` is the event's
/// arrival time; movement keys feed it to the scroll debounce so bursts are
/// measured on the caller's clock.
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search_key(app, key),
        InputMode::Normal => handle_normal_key(app, key, now),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            app.on_scroll(now);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            app.on_scroll(now);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_first();
            app.on_scroll(now);
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_last();
            app.on_scroll(now);
        }
        KeyCode::Tab => app.cycle_category(),
        KeyCode::BackTab => app.cycle_category_back(),
        KeyCode::Char('c') => app.cycle_country(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('n') => app.open_next_page(),
        KeyCode::Char('p') => app.open_previous_page(),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
