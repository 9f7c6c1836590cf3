//! Background page fetching.
//!
//! Runs on a dedicated thread so the UI stays responsive while a request is
//! in the air.  The worker is a plain request/answer loop over [`mpsc`]
//! channels: the app sends one [`FetchRequest`] at a time (the pager never
//! has more than one outstanding), the worker asks the source for that page
//! and answers with a [`FetchMsg`].
//!
//! The worker is also where fetch failures disappear.  [`page_or_empty`]
//! folds an `Err` from the source into an empty page after logging it, so
//! downstream code only ever sees pages, and an empty page ends the
//! session's scrolling.  Keep that fold in exactly this one place; if
//! failures ever need their own treatment, this is the seam to split.

use std::sync::mpsc;
use std::thread;

use tracing::{debug, warn};

use crate::source::{Article, NewsQuery, PageSource};

/// One page request for the worker.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Session this request belongs to, echoed back verbatim so answers
    /// that outlive their session can be recognised and dropped.
    pub generation: u64,
    /// Filters to fetch under.
    pub query: NewsQuery,
    /// 1-based page to fetch.
    pub page: u32,
}

/// The worker's answer to a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchMsg {
    /// Copied from the request.
    pub generation: u64,
    /// Copied from the request.
    pub page: u32,
    /// The settled page.  Fetch failures arrive here as an empty list.
    pub articles: Vec<Article>,
}

/// Fold a fetch outcome into a page.
///
/// Errors are logged and become the empty page, which means "the upstream
/// failed" and "the upstream has nothing" are indistinguishable downstream.
/// That merge is inherited behavior the rest of the application relies on.
pub fn page_or_empty(
    source_name: &str,
    page: u32,
    outcome: anyhow::Result<Vec<Article>>,
) -> Vec<Article> {
    match outcome {
        Ok(articles) => articles,
        Err(e) => {
            warn!(
                source = source_name,
                page,
                error = %e,
                "page fetch failed, treating as empty"
            );
            Vec::new()
        }
    }
}

/// Spawn the background fetch thread.
///
/// Returns the request sender and the answer receiver for the main loop.
/// The thread exits when the sender side is dropped (the quit path) and
/// stops on its own if the receiver side is gone.
pub fn spawn(source: Box<dyn PageSource>) -> (mpsc::Sender<FetchRequest>, mpsc::Receiver<FetchMsg>) {
    let (req_tx, req_rx) = mpsc::channel::<FetchRequest>();
    let (msg_tx, msg_rx) = mpsc::channel::<FetchMsg>();

    thread::spawn(move || {
        while let Ok(req) = req_rx.recv() {
            debug!(page = req.page, query = %req.query, "fetching page");
            let outcome = source.fetch_page(&req.query, req.page);
            let articles = page_or_empty(source.name(), req.page, outcome);
            let msg = FetchMsg {
                generation: req.generation,
                page: req.page,
                articles,
            };
            // If the receiver is gone the main thread has exited;
            // silently stop fetching.
            if msg_tx.send(msg).is_err() {
                return;
            }
        }
    });

    (req_tx, msg_rx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
