//! SEO metadata extraction from raw HTML.
//!
//! Parsing is lenient (html5ever via `scraper`), so malformed markup never
//! fails; a missing element simply yields `None`.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Column bound for `url_checks.h1` and `url_checks.title`
pub const MAX_TEXT_LENGTH: usize = 255;

/// Metadata pulled from a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Extract h1, title and meta description from a page.
///
/// h1 and title are truncated to `MAX_TEXT_LENGTH` characters so they always
/// fit their columns.
pub fn extract(html: &str) -> Metadata {
    let document = Html::parse_document(html);

    Metadata {
        h1: first_text(&document, "h1").map(|t| truncate_chars(t, MAX_TEXT_LENGTH)),
        title: first_text(&document, "title").map(|t| truncate_chars(t, MAX_TEXT_LENGTH)),
        description: meta_description(&document),
    }
}

/// Trimmed text content of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// `content` of the first `<meta name="description">`
fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;
    document
        .select(&selector)
        .find(|el| el.value().attr("name") == Some("description"))
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// Cut `text` to at most `max` characters without splitting a code point
pub fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max) {
        tracing::debug!(
            original_chars = text.chars().count(),
            max,
            "Truncating extracted text"
        );
        text.truncate(byte_index);
    }
    text
}
