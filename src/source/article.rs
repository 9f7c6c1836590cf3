//! The core data type shared across the application.
//!
//! `Article` mirrors one article object from the upstream news API, kept
//! deliberately loose: every field the UI touches is optional, because the
//! upstream guarantees none of them.  There is no identity field either; the
//! upstream can and does repeat articles between pages, and the dashboard
//! shows whatever arrives in arrival order, so the list code must not assume
//! uniqueness.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single article as returned by the upstream news API.
///
/// Field names map onto the upstream's camelCase JSON.  Unknown fields in
/// the payload are ignored, and absent or `null` fields become `None`.
/// Rendering code should go through [`display_title`](Article::display_title)
/// and [`display_description`](Article::display_description) rather than
/// unwrapping the options itself.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline text.
    #[serde(default)]
    pub title: Option<String>,

    /// Short summary or teaser paragraph.
    #[serde(default)]
    pub description: Option<String>,

    /// URL of the full story.
    #[serde(default)]
    pub url: Option<String>,

    /// Lead image URL.  Carried through for completeness; the terminal UI
    /// does not render images.
    #[serde(default)]
    pub url_to_image: Option<String>,

    /// Publication timestamp exactly as the upstream sent it (RFC 3339 when
    /// present).
    ///
    /// Kept as the raw string on purpose: a strict date type here would
    /// reject a whole page over one malformed stamp.  Use
    /// [`published`](Article::published) for a parsed view.
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Article {
    /// Headline, with a placeholder for articles that arrive without one.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    /// Description, with the dashboard's placeholder text.
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }

    /// Publication time, if the upstream sent a parseable RFC 3339 stamp.
    ///
    /// Gracefully degrades to `None` on a missing or malformed date.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
