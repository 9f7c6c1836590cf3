//! Diagnostics setup.
//!
//! The TUI owns the terminal, so logs can never go to stdout or stderr
//! while the alternate screen is up.  When the user asks for diagnostics
//! (`--log-file`) a [`tracing`] subscriber is installed that writes there;
//! without it, tracing calls are no-ops.  `RUST_LOG` filters as usual and
//! defaults to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, writing to `path` (truncates).
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    build_subscriber(file, filter).init();
    Ok(())
}

/// The core subscriber configuration, shared between production and tests.
fn build_subscriber(log_file: File, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    // ANSI colour codes are for terminals; the log file gets plain text.
    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_land_in_the_log_file() {
        let path = std::env::temp_dir().join(format!("newscroll-test-{}.log", std::process::id()));
        let file = File::create(&path).unwrap();

        let subscriber = build_subscriber(file, EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(page = 2, "fetching page");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("fetching page"));
        assert!(contents.contains("page=2"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn filter_drops_events_below_the_threshold() {
        let path = std::env::temp_dir().join(format!(
            "newscroll-test-filter-{}.log",
            std::process::id()
        ));
        let file = File::create(&path).unwrap();

        let subscriber = build_subscriber(file, EnvFilter::new("warn"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("too quiet to record");
            tracing::warn!("loud enough to record");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("too quiet"));
        assert!(contents.contains("loud enough"));

        let _ = std::fs::remove_file(&path);
    }
}
