//! News API source implementation.
//!
//! Talks to the newsapi.org v2 REST endpoints.  Two request shapes exist:
//!
//! * free-text search against `/v2/everything`, used whenever the session
//!   has search text (search overrides category and country);
//! * category headlines against `/v2/top-headlines`, with a one-shot retry
//!   against `/v2/everything` using a hand-maintained keyword expansion when
//!   the headlines come back empty.  The headline index is shallow for many
//!   category/country pairs, and the expansion keeps those feeds usable.
//!
//! Error envelopes from the upstream (rate limits included) are *not*
//! failures here: they carry no `articles` field, parse to zero articles,
//! and flow through the same path as a genuinely empty page.  Only transport
//! failures and unparseable bodies return `Err`, and the fetch worker folds
//! those into empty pages as well.  Callers therefore can never distinguish
//! "no results" from "upstream broke"; that is the dashboard's long-standing
//! contract and it must stay that way.

use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

use super::{Article, NewsQuery, PageSource};

/// Fixed number of articles requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Base of the upstream REST API.
const API_ROOT: &str = "https://newsapi.org/v2";

/// How long one upstream request may take before it is abandoned.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Expand a category into the free-text query used when its headline feed
/// comes back empty.  Categories without a curated expansion fall back to
/// the literal category text.
fn category_fallback_query(category: &str) -> String {
    match category {
        "technology" => "(technology OR AI OR gadgets OR programming)".to_string(),
        "sports" => "(cricket OR football OR olympics OR tennis OR IPL)".to_string(),
        "business" => "(business OR finance OR startup OR stock market)".to_string(),
        "health" => "(health OR doctor OR medicine OR fitness)".to_string(),
        "science" => "(science OR space OR NASA OR research)".to_string(),
        "entertainment" => "(movies OR bollywood OR hollywood OR netflix)".to_string(),
        other => other.to_string(),
    }
}

/// Wire shape of an upstream response body.
///
/// Only the article list matters.  Error envelopes
/// (`{"status":"error",...}`) have no `articles` field and deserialize to an
/// empty list, which is exactly how the rest of the application wants to
/// see them.
#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Parse a response body into articles.
///
/// This is a pure function (no I/O) so that tests can exercise the lenient
/// parsing rules without hitting the network.
fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let response: NewsResponse = serde_json::from_str(body)?;
    Ok(response.articles)
}

/// The live newsapi.org source.
pub struct NewsApiSource {
    /// Upstream API credential, sent as the `apiKey` query parameter.
    api_key: String,
    /// Shared blocking HTTP client.
    client: Client,
}

impl NewsApiSource {
    /// Create a source around the given API credential.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key: api_key.into(),
            client,
        })
    }

    /// URL for a free-text query against `/v2/everything`.
    fn everything_url(&self, text: &str, page: u32) -> Result<Url> {
        let page_size = PAGE_SIZE.to_string();
        let page = page.to_string();
        let url = Url::parse_with_params(
            &format!("{API_ROOT}/everything"),
            [
                ("q", text),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
                ("page", page.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )?;
        Ok(url)
    }

    /// URL for a category/country query against `/v2/top-headlines`.
    fn headlines_url(&self, query: &NewsQuery, page: u32) -> Result<Url> {
        let page_size = PAGE_SIZE.to_string();
        let page = page.to_string();
        let url = Url::parse_with_params(
            &format!("{API_ROOT}/top-headlines"),
            [
                ("country", query.country.as_str()),
                ("category", query.category.as_str()),
                ("pageSize", page_size.as_str()),
                ("page", page.as_str()),
                ("apiKey", self.api_key.as_str()),
            ],
        )?;
        Ok(url)
    }

    /// Fetch one page of `query`, using `get` for the HTTP legwork.
    ///
    /// The routing and fallback decisions all live here; `get` is a closure
    /// so tests can serve canned bodies while production passes the real
    /// client.  `Err` from `get` propagates without trying the fallback: a
    /// broken transport would break the retry too.
    fn fetch_page_with(
        &self,
        mut get: impl FnMut(&Url) -> Result<String>,
        query: &NewsQuery,
        page: u32,
    ) -> Result<Vec<Article>> {
        // Search text wins over everything else, category and country included.
        if !query.search.is_empty() {
            let url = self.everything_url(&query.search, page)?;
            return parse_articles(&get(&url)?);
        }

        let url = self.headlines_url(query, page)?;
        let articles = parse_articles(&get(&url)?)?;
        if !articles.is_empty() {
            return Ok(articles);
        }

        // The headline feed has nothing for this page.  Retry the category
        // as a keyword query before reporting the page empty.
        let fallback = self.everything_url(&category_fallback_query(&query.category), page)?;
        parse_articles(&get(&fallback)?)
    }

    /// Perform one GET and return the body text.
    ///
    /// No status check on purpose: the upstream signals errors inside the
    /// JSON body, and those must count as zero articles rather than
    /// failures.
    fn get_text(&self, url: &Url) -> Result<String> {
        let body = self.client.get(url.clone()).send()?.text()?;
        Ok(body)
    }
}

impl PageSource for NewsApiSource {
    fn name(&self) -> &str {
        "newsapi.org"
    }

    fn fetch_page(&self, query: &NewsQuery, page: u32) -> Result<Vec<Article>> {
        self.fetch_page_with(|url| self.get_text(url), query, page)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
