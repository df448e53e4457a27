//! Wikipedia article URL validation.
//!
//! URLs are checked locally before any request reaches the backend. Only
//! article pages on a two- or three-letter language subdomain are accepted.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Pattern an article URL must match.
pub const ARTICLE_URL_PATTERN: &str = r"^https?://[a-z]{2,3}\.wikipedia\.org/wiki/.+$";

/// Article URLs offered to users who don't have one at hand.
pub const EXAMPLE_URLS: [&str; 4] = [
    "https://en.wikipedia.org/wiki/Alan_Turing",
    "https://en.wikipedia.org/wiki/Artificial_intelligence",
    "https://en.wikipedia.org/wiki/World_War_II",
    "https://en.wikipedia.org/wiki/Albert_Einstein",
];

static ARTICLE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ARTICLE_URL_PATTERN).expect("article URL pattern is valid"));

/// Why an article URL was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// Nothing but whitespace was entered.
    #[error("Please enter a Wikipedia URL")]
    Empty,

    /// The input is not a Wikipedia article URL.
    #[error("Please enter a valid Wikipedia article URL (e.g., https://en.wikipedia.org/wiki/Alan_Turing)")]
    NotWikipedia,
}

/// Check that `input` is a Wikipedia article URL.
///
/// Surrounding whitespace is ignored; the trimmed URL is returned.
///
/// # Errors
///
/// Returns [`UrlError::Empty`] for blank input and [`UrlError::NotWikipedia`]
/// when the URL doesn't match [`ARTICLE_URL_PATTERN`].
pub fn validate_article_url(input: &str) -> Result<&str, UrlError> {
    let url = input.trim();
    if url.is_empty() {
        return Err(UrlError::Empty);
    }
    if !ARTICLE_URL.is_match(url) {
        return Err(UrlError::NotWikipedia);
    }
    Ok(url)
}
