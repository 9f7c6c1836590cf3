//! Command-line interface.
//!
//! The flags mirror the dashboard's address bar: the category is a
//! positional argument (the path segment) and country, page, and search are
//! options (the query parameters), with the same defaults.  The API
//! credential is read from the environment by default so it stays out of
//! shell history.

use std::path::PathBuf;

use clap::Parser;

use crate::source::{DEFAULT_CATEGORY, DEFAULT_COUNTRY};

/// Command-line arguments for the news dashboard.
///
/// # Examples
///
/// ```sh
/// # The technology feed for India, key from $NEWS_API_KEY
/// newscroll
///
/// # Business headlines for the United States, starting at page 3
/// newscroll business --country us --page 3
///
/// # Free-text search (category and country are ignored while it is set)
/// newscroll --search "cricket world cup"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Category feed to open (technology, business, sports, health,
    /// science, entertainment)
    #[arg(default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Two-letter country code for the headline feed
    #[arg(short, long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Page to open first
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Free-text search; when set, the category feed is bypassed
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// newsapi.org API credential
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Write diagnostics to this file (the TUI owns the terminal, so
    /// nothing is ever logged to the screen)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard_routes() {
        let cli = Cli::parse_from(["newscroll", "--api-key", "k"]);

        assert_eq!(cli.category, "technology");
        assert_eq!(cli.country, "in");
        assert_eq!(cli.page, 1);
        assert_eq!(cli.search, "");
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn category_is_positional() {
        let cli = Cli::parse_from(["newscroll", "sports", "--api-key", "k"]);
        assert_eq!(cli.category, "sports");
    }

    #[test]
    fn short_flags_cover_the_query_parameters() {
        let cli = Cli::parse_from([
            "newscroll", "business", "-c", "us", "-p", "3", "-s", "stock market", "--api-key", "k",
        ]);

        assert_eq!(cli.category, "business");
        assert_eq!(cli.country, "us");
        assert_eq!(cli.page, 3);
        assert_eq!(cli.search, "stock market");
    }

    #[test]
    fn page_zero_is_rejected() {
        let result = Cli::try_parse_from(["newscroll", "--page", "0", "--api-key", "k"]);
        assert!(result.is_err(), "pages are 1-based");
    }

    #[test]
    fn log_file_is_a_path() {
        let cli = Cli::parse_from(["newscroll", "--log-file", "/tmp/news.log", "--api-key", "k"]);
        assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("/tmp/news.log")));
    }
}
