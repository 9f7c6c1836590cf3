use std::sync::mpsc::Sender;
use std::time::Instant;

use ratatui::widgets::ListState;
use tracing::{debug, info};

use crate::fetch::{FetchMsg, FetchRequest};
use crate::scroll::{Debounce, Pager, DEBOUNCE_QUIET};
use crate::source::{Article, NewsQuery};

/// Categories the dashboard cycles through, in display order.
pub const CATEGORIES: [&str; 6] = [
    "technology",
    "business",
    "sports",
    "health",
    "science",
    "entertainment",
];

/// Country filter catalogue: upstream code plus display name.
pub const COUNTRIES: [(&str, &str); 5] = [
    ("in", "India"),
    ("us", "United States"),
    ("gb", "United Kingdom"),
    ("au", "Australia"),
    ("ca", "Canada"),
];

/// Selection rows from the end of the list that count as "near the bottom".
///
/// The scroll trigger fires when the reader is within the last few
/// headlines, the row-based equivalent of "within 300 px of the page end".
pub const NEAR_BOTTOM_ROWS: usize = 5;

/// Whether keys drive the list or the search prompt.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    /// Articles shown, in arrival order.  Append-only for the life of a
    /// session, and duplicates across pages are kept: the upstream can
    /// repeat articles between pages and the dashboard shows what arrived.
    pub items: Vec<Article>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Filters the current session is pinned to.
    pub query: NewsQuery,
    /// First page of the current session; page navigation changes it.
    pub start_page: u32,
    /// Pagination state machine for the current session.
    pub pager: Pager,
    /// Scroll-burst filter driving the trigger check.
    debounce: Debounce,
    /// True while the session's first page is still loading.
    priming: bool,
    /// Monotonic session counter, stamped onto every request so answers
    /// that outlive their session can be recognised and dropped.
    generation: u64,
    /// Channel to the fetch worker.
    req_tx: Sender<FetchRequest>,
    /// Normal scrolling vs. the search prompt.
    pub input_mode: InputMode,
    /// Text being typed into the search prompt.
    pub search_draft: String,
    /// Last status message.
    pub status: String,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    /// Create the app and kick off the first session.
    pub fn new(query: NewsQuery, start_page: u32, req_tx: Sender<FetchRequest>) -> Self {
        let mut app = Self {
            items: Vec::new(),
            list_state: ListState::default(),
            query,
            start_page,
            pager: Pager::new(start_page + 1),
            debounce: Debounce::new(DEBOUNCE_QUIET),
            priming: false,
            generation: 0,
            req_tx,
            input_mode: InputMode::Normal,
            search_draft: String::new(),
            status: String::new(),
            quit: false,
        };
        app.begin_session();
        app
    }

    // -- session lifecycle ---------------------------------------------------

    /// Start over under the current filters: drop the list, invalidate any
    /// in-flight answer, and fetch the session's first page.
    fn begin_session(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.list_state = ListState::default();
        self.pager = Pager::new(self.start_page + 1);
        self.debounce = Debounce::new(DEBOUNCE_QUIET);
        self.priming = true;
        self.status = "Loading…".to_string();
        info!(query = %self.query, page = self.start_page, "starting session");
        self.send(self.start_page);
    }

    fn send(&self, page: u32) {
        let request = FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            page,
        };
        // A closed channel means the worker is gone, which only happens on
        // shutdown; there is nothing useful to do about it here.
        let _ = self.req_tx.send(request);
    }

    /// Handle an answer from the fetch worker.
    pub fn on_fetch(&mut self, msg: FetchMsg) {
        if msg.generation != self.generation {
            debug!(page = msg.page, "dropping answer from a dead session");
            return;
        }

        if self.priming {
            self.priming = false;
            self.items = msg.articles;
            self.status = if self.items.is_empty() {
                "No news found or API limit exceeded".to_string()
            } else {
                format!("Loaded {} articles", self.items.len())
            };
            return;
        }

        let received = msg.articles.len();
        if !self.pager.complete(received) {
            return; // an answer we never asked for
        }
        if received == 0 {
            self.status = "No more articles available for this selection.".to_string();
        } else {
            self.items.extend(msg.articles);
            self.status = format!("Loaded {received} more articles");
        }
    }

    /// True while the session's first page is still in the air.
    pub fn is_priming(&self) -> bool {
        self.priming
    }

    // -- scroll trigger ------------------------------------------------------

    /// Note a scroll event.  Each one pushes the debounce deadline out, so
    /// the trigger check runs once per burst, after the burst goes quiet.
    pub fn on_scroll(&mut self, now: Instant) {
        self.debounce.record(now);
    }

    /// Periodic tick from the event loop.  Runs the near-bottom check once
    /// the scroll burst has settled and requests the next page if it passes.
    pub fn on_tick(&mut self, now: Instant) {
        if !self.debounce.ready(now) {
            return;
        }
        if !self.near_bottom() {
            return;
        }
        self.request_next_page();
    }

    /// True when the selection sits in the last [`NEAR_BOTTOM_ROWS`] rows.
    fn near_bottom(&self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match self.list_state.selected() {
            Some(i) => self.items.len() - i <= NEAR_BOTTOM_ROWS,
            None => false,
        }
    }

    fn request_next_page(&mut self) {
        if self.priming {
            return; // scrolling starts counting after the first page lands
        }
        if let Some(page) = self.pager.request() {
            self.status = "Loading more…".to_string();
            self.send(page);
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.list_state.select(Some(self.items.len() - 1));
        }
    }

    /// Bounds-checked view of the selected article.
    pub fn selected_article(&self) -> Option<&Article> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    // -- filters -------------------------------------------------------------

    /// Move to the next category (wrapping).  Search text is kept; it just
    /// stays dormant until the search is cleared.
    pub fn cycle_category(&mut self) {
        let next = match CATEGORIES.iter().position(|c| *c == self.query.category) {
            Some(i) => CATEGORIES[(i + 1) % CATEGORIES.len()],
            None => CATEGORIES[0], // off-catalogue category from the CLI
        };
        self.query.category = next.to_string();
        self.start_page = 1;
        self.begin_session();
    }

    /// Move to the previous category (wrapping).
    pub fn cycle_category_back(&mut self) {
        let previous = match CATEGORIES.iter().position(|c| *c == self.query.category) {
            Some(i) => CATEGORIES[(i + CATEGORIES.len() - 1) % CATEGORIES.len()],
            None => CATEGORIES[0],
        };
        self.query.category = previous.to_string();
        self.start_page = 1;
        self.begin_session();
    }

    /// Move to the next country (wrapping).
    pub fn cycle_country(&mut self) {
        let next = match COUNTRIES.iter().position(|(code, _)| *code == self.query.country) {
            Some(i) => COUNTRIES[(i + 1) % COUNTRIES.len()].0,
            None => COUNTRIES[0].0,
        };
        self.query.country = next.to_string();
        self.start_page = 1;
        self.begin_session();
    }

    // -- page navigation -----------------------------------------------------

    /// Open the next page as a fresh session, like following "Next →".
    pub fn open_next_page(&mut self) {
        self.start_page += 1;
        self.begin_session();
    }

    /// Open the previous page as a fresh session.  Refused on page 1, where
    /// the dashboard offers no "← Previous" link.
    pub fn open_previous_page(&mut self) {
        if self.start_page > 1 {
            self.start_page -= 1;
            self.begin_session();
        }
    }

    /// Last page this session has fully loaded, for the title's page range.
    pub fn last_loaded_page(&self) -> u32 {
        self.pager.next_page().saturating_sub(1)
    }

    // -- search prompt -------------------------------------------------------

    /// Enter the search prompt, pre-filled with the active search text.
    pub fn open_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_draft = self.query.search.clone();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_draft.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_draft.pop();
    }

    /// Commit the prompt.  Empty text clears the search and drops the user
    /// back onto the category feed.
    pub fn submit_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.query.search = self.search_draft.trim().to_string();
        self.start_page = 1;
        self.begin_session();
    }

    /// Leave the prompt without changing the session.
    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_draft.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
