//! newscroll — a scrolling news dashboard for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐   FetchMsg   ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ───────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread) │ ◄─────────── │ (state)  │          │ (render) │
//! └────┬─────┘ FetchRequest └──────────┘          └──────────┘
//!      │                         ▲
//!   source/                      │ handle_key_event()
//!  (news API)               ┌──────────┐
//!                           │ input.rs │
//!                           └──────────┘
//! ```
//!
//! * **`source/`** — the `PageSource` trait and the newsapi.org client.
//! * **`scroll`** — the pagination state machine and the scroll debounce.
//! * **`fetch`** — a background thread that fetches one page per request.
//! * **`app`** — owns all application state (articles, filters, sessions).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`cli`** / **`logging`** — argument parsing and optional file logging.
//! * **`main`** — wires everything together: parse args, set up the
//!   terminal, and run the event loop.

mod app;
mod cli;
mod fetch;
mod input;
mod logging;
mod scroll;
mod source;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use cli::Cli;
use source::{NewsApiSource, NewsQuery};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.  This prevents the common TUI bug where a panic leaves the
/// terminal in a broken state.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.  Without this, a panic inside the event loop would leave
/// raw mode enabled and the alternate screen active.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // -- parse arguments -----------------------------------------------------
    let args = Cli::parse();
    if let Some(path) = &args.log_file {
        logging::init(path)?;
    }
    info!(
        category = %args.category,
        country = %args.country,
        page = args.page,
        "starting up"
    );

    install_panic_hook();

    // -- configure the article source ----------------------------------------
    // Built before the terminal guard so a bad client configuration reports
    // on a normal screen.
    let query = NewsQuery::new(&args.category, &args.country, &args.search);
    let news = NewsApiSource::new(&args.api_key)?;

    // -- start the background fetch worker -----------------------------------
    let (req_tx, msg_rx) = fetch::spawn(Box::new(news));

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(query, args.page, req_tx);

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Drain any answers from the fetch worker.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    //   4. Run the debounced scroll-trigger check.
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Process fetch answers
        while let Ok(msg) = msg_rx.try_recv() {
            app.on_fetch(msg);
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key, Instant::now());
            }
        }

        // 4. Fire the scroll trigger once a burst has settled
        app.on_tick(Instant::now());

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal; dropping `app` closes
    // the request channel, which shuts the worker down.
    Ok(())
}
