//! Scroll-driven pagination state.
//!
//! Two small pure pieces together decide when the next page of articles is
//! fetched:
//!
//! * [`Pager`] is a three-state machine (idle / fetching / exhausted) that
//!   owns the page cursor.  It enforces the session's invariants: at most
//!   one fetch in flight, the cursor advances only when a page actually
//!   arrived, and exhaustion is terminal.
//! * [`Debounce`] filters scroll bursts.  Scrolling produces a stream of
//!   events; the near-bottom check may only run after a quiet window with no
//!   further events, and every new event pushes the deadline back out.
//!
//! Neither type does I/O or reads the clock.  Callers pass `Instant`s in,
//! which keeps every transition testable against a synthetic timeline.

use std::time::{Duration, Instant};

/// Quiet window a scroll burst must observe before the trigger check runs.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(250);

/// Where a session's fetch machinery currently stands.
///
/// Exactly one of these holds at any time.  `Exhausted` is terminal: once a
/// page comes back empty the session never fetches again.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FetchState {
    /// No request outstanding; a trigger may start one.
    Idle,
    /// A request is in flight; further triggers are refused.
    Fetching,
    /// An empty page ended the feed; all further triggers are refused.
    Exhausted,
}

/// The pagination state machine for one session.
///
/// ## Transitions
///
/// ```text
///            request()                complete(n > 0)
///   Idle ───────────────► Fetching ───────────────────► Idle (cursor + 1)
///                             │
///                             │ complete(0)
///                             ▼
///                         Exhausted            (absorbing)
/// ```
///
/// [`request()`](Pager::request) hands out the page to fetch at most once
/// per round trip; calls in any state but `Idle` return `None`.  That is
/// the single-flight guard, and it is also what collapses a burst of
/// trigger events into one fetch.
#[derive(Debug, Clone)]
pub struct Pager {
    state: FetchState,
    next_page: u32,
}

impl Pager {
    /// A fresh pager whose first fetch will ask for `next_page`.
    pub fn new(next_page: u32) -> Self {
        Self {
            state: FetchState::Idle,
            next_page,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Page the next successful [`request()`](Pager::request) will hand out.
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Try to start a fetch.  Returns the page to request, or `None` when a
    /// fetch is already in flight or the feed is exhausted.
    pub fn request(&mut self) -> Option<u32> {
        match self.state {
            FetchState::Idle => {
                self.state = FetchState::Fetching;
                Some(self.next_page)
            }
            FetchState::Fetching | FetchState::Exhausted => None,
        }
    }

    /// Record the outcome of the in-flight fetch: `received` is the number
    /// of articles the page carried.
    ///
    /// Zero articles means the feed is over (by contract, upstream failures
    /// arrive here as zero too) and the pager parks itself permanently.
    /// Anything else advances the cursor and reopens for the next trigger.
    ///
    /// Returns `false` when no fetch was in flight; such calls change
    /// nothing.
    pub fn complete(&mut self, received: usize) -> bool {
        if self.state != FetchState::Fetching {
            return false;
        }
        if received == 0 {
            self.state = FetchState::Exhausted;
        } else {
            self.next_page += 1;
            self.state = FetchState::Idle;
        }
        true
    }
}

/// Reset-on-event debounce over a caller-supplied clock.
///
/// [`record()`](Debounce::record) notes an event and (re)arms a deadline one
/// quiet window into the future.  [`ready()`](Debounce::ready) reports
/// whether that deadline has passed, and disarms on firing so each burst of
/// events produces exactly one evaluation.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Note an event at `now`, pushing the deadline out to `now + quiet`.
    pub fn record(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True once the quiet window has elapsed since the last event.  Fires
    /// at most once per armed deadline.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_hands_out_the_cursor_and_blocks_reentry() {
        let mut pager = Pager::new(2);

        assert_eq!(pager.request(), Some(2));
        assert_eq!(pager.state(), FetchState::Fetching);

        // Further triggers while the fetch is out get nothing.
        assert_eq!(pager.request(), None);
        assert_eq!(pager.request(), None);
    }

    #[test]
    fn full_pages_advance_the_cursor() {
        let mut pager = Pager::new(2);

        assert_eq!(pager.request(), Some(2));
        pager.complete(20);
        assert_eq!(pager.state(), FetchState::Idle);

        assert_eq!(pager.request(), Some(3));
        pager.complete(20);
        assert_eq!(pager.request(), Some(4));
    }

    #[test]
    fn cursor_counts_completed_pages_from_the_start() {
        let mut pager = Pager::new(5);

        for _ in 0..3 {
            pager.request();
            pager.complete(7);
        }

        // Three completed pages after starting at 5.
        assert_eq!(pager.next_page(), 8);
    }

    #[test]
    fn short_pages_still_count_as_progress() {
        let mut pager = Pager::new(2);

        pager.request();
        pager.complete(3);

        assert_eq!(pager.state(), FetchState::Idle);
        assert_eq!(pager.next_page(), 3);
    }

    #[test]
    fn empty_page_exhausts_permanently() {
        let mut pager = Pager::new(2);

        pager.request();
        pager.complete(0);
        assert_eq!(pager.state(), FetchState::Exhausted);

        // No amount of asking reopens the feed.
        assert_eq!(pager.request(), None);
        assert_eq!(pager.request(), None);
        assert_eq!(pager.state(), FetchState::Exhausted);
        assert_eq!(pager.next_page(), 2, "cursor does not move past the end");
    }

    #[test]
    fn completion_without_a_request_is_ignored() {
        let mut pager = Pager::new(2);

        assert!(!pager.complete(20));
        assert_eq!(pager.state(), FetchState::Idle);
        assert_eq!(pager.next_page(), 2);

        assert!(!pager.complete(0));
        assert_eq!(pager.state(), FetchState::Idle, "cannot exhaust from idle");
    }

    #[test]
    fn burst_of_triggers_yields_one_fetch_per_round_trip() {
        let mut pager = Pager::new(2);

        let handed_out: Vec<_> = (0..5).filter_map(|_| pager.request()).collect();
        assert_eq!(handed_out, vec![2], "one fetch despite five triggers");

        pager.complete(20);
        let handed_out: Vec<_> = (0..5).filter_map(|_| pager.request()).collect();
        assert_eq!(handed_out, vec![3]);
    }

    #[test]
    fn debounce_waits_for_the_quiet_window() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(250));

        debounce.record(t0);
        assert!(!debounce.ready(t0 + Duration::from_millis(100)));
        assert!(!debounce.ready(t0 + Duration::from_millis(249)));
        assert!(debounce.ready(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn each_event_pushes_the_deadline_out() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(250));

        debounce.record(t0);
        debounce.record(t0 + Duration::from_millis(200));

        // 250ms after the first event, but only 50ms after the second.
        assert!(!debounce.ready(t0 + Duration::from_millis(250)));
        assert!(debounce.ready(t0 + Duration::from_millis(450)));
    }

    #[test]
    fn fires_once_per_burst() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(250));

        debounce.record(t0);
        assert!(debounce.ready(t0 + Duration::from_millis(300)));
        assert!(
            !debounce.ready(t0 + Duration::from_millis(301)),
            "deadline is consumed on firing"
        );
    }

    #[test]
    fn idle_debounce_never_fires() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(250));

        assert!(!debounce.ready(t0));
        assert!(!debounce.ready(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn rearms_after_firing() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(250));

        debounce.record(t0);
        assert!(debounce.ready(t0 + Duration::from_millis(250)));

        debounce.record(t0 + Duration::from_millis(400));
        assert!(!debounce.ready(t0 + Duration::from_millis(500)));
        assert!(debounce.ready(t0 + Duration::from_millis(650)));
    }
}
