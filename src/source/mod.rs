//! Article source abstraction layer.
//!
//! This module defines the [`PageSource`] trait, the common [`Article`] type,
//! and the [`NewsQuery`] filter set a session is pinned to.  The concrete
//! news API implementation lives in [`newsapi`]; everything above this layer
//! only ever sees the trait, so tests can substitute a scripted source and a
//! different upstream would slot in without touching the scroll or UI code.

mod article;
mod newsapi;

// Re-export the public API of this module so callers can write
// `use crate::source::{Article, NewsApiSource, NewsQuery, PageSource};`
pub use article::Article;
pub use newsapi::NewsApiSource;

use std::fmt;

use anyhow::Result;

/// Category feed opened when none is asked for.
pub const DEFAULT_CATEGORY: &str = "technology";

/// Country feed opened when none is asked for.
pub const DEFAULT_COUNTRY: &str = "in";

/// The filter set one session is pinned to.
///
/// Mirrors the dashboard's address bar: a category path segment plus
/// `country` and `search` query parameters.  When `search` is non-empty the
/// upstream routing ignores `category` and `country` entirely (see
/// [`NewsApiSource`]); both are still carried so that clearing the search
/// drops the user back onto the feed they came from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewsQuery {
    /// Category feed, lower-cased (e.g. "technology").
    pub category: String,
    /// Two-letter country code, lower-cased (e.g. "in").
    pub country: String,
    /// Free-text search; empty means "no search active".
    pub search: String,
}

impl NewsQuery {
    /// Build a query, normalising the way the dashboard's routes do:
    /// category and country are lower-cased, search text is trimmed.
    pub fn new(
        category: impl Into<String>,
        country: impl Into<String>,
        search: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into().trim().to_lowercase(),
            country: country.into().trim().to_lowercase(),
            search: search.into().trim().to_string(),
        }
    }
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY, DEFAULT_COUNTRY, "")
    }
}

impl fmt::Display for NewsQuery {
    /// Short label for titles and logs: the search text when one is active,
    /// otherwise the category/country pair.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.search.is_empty() {
            write!(f, "{} · {}", self.category, self.country.to_uppercase())
        } else {
            write!(f, "search \"{}\"", self.search)
        }
    }
}

/// Trait that every paginated article source must implement.
///
/// The fetch worker calls [`fetch_page()`](PageSource::fetch_page) on a
/// background thread, so implementations must be [`Send`].
///
/// A page is a plain `Vec<Article>` in upstream order; an empty vec means
/// the source has nothing (more) for this query, which callers treat as the
/// end of the feed.
pub trait PageSource: Send {
    /// Human-readable label used in logs.
    fn name(&self) -> &str;

    /// Fetch one page of articles for `query`.  `page` is 1-based.
    ///
    /// Implementations perform their own HTTP/IO work and return parsed
    /// [`Article`] values without de-duplicating or reordering them.
    fn fetch_page(&self, query: &NewsQuery, page: u32) -> Result<Vec<Article>>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalises_case_and_whitespace() {
        let query = NewsQuery::new("Technology", "IN", "  climate change ");

        assert_eq!(query.category, "technology");
        assert_eq!(query.country, "in");
        assert_eq!(query.search, "climate change");
    }

    #[test]
    fn default_is_the_technology_feed_for_india() {
        let query = NewsQuery::default();

        assert_eq!(query.category, "technology");
        assert_eq!(query.country, "in");
        assert!(query.search.is_empty());
    }

    #[test]
    fn display_prefers_active_search() {
        let feed = NewsQuery::new("sports", "gb", "");
        assert_eq!(feed.to_string(), "sports · GB");

        let searched = NewsQuery::new("sports", "gb", "cricket");
        assert_eq!(searched.to_string(), "search \"cricket\"");
    }
}
