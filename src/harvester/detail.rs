//! Detail page retrieval
//!
//! Cards of the legacy layout carry no description, so the body comes from
//! the post's own page. A failure here is local to one card.

use crate::harvester::fetcher::{fetch_url, UserAgentPool};
use crate::harvester::schema::MarkupSchema;
use crate::text::{normalize_text, truncate_chars};
use crate::HarvestError;
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Truncates raw body text to `max_chars` characters, then cleans it
///
/// Returns None when nothing is left after cleaning.
pub fn clean_body(raw: &str, max_chars: usize) -> Option<String> {
    let body = normalize_text(truncate_chars(raw, max_chars));
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// Extracts the cleaned body text from a detail page
pub fn extract_detail_body(html: &str, schema: &MarkupSchema, max_chars: usize) -> Option<String> {
    let document = Html::parse_document(html);
    schema
        .detail_body_of(&document)
        .and_then(|raw| clean_body(&raw, max_chars))
}

/// Fetches a post's detail page and returns its cleaned body text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The post permalink
/// * `user_agents` - Pool the request's `User-Agent` is drawn from
/// * `schema` - Layout the listing was parsed with
/// * `max_chars` - Body text is cut to this many characters
///
/// # Returns
///
/// * `Ok(String)` - Non-empty body text
/// * `Err(HarvestError)` - Transport failure, non-2xx status, or no body container
pub async fn fetch_detail_body(
    client: &Client,
    url: &Url,
    user_agents: &UserAgentPool,
    schema: &MarkupSchema,
    max_chars: usize,
) -> Result<String, HarvestError> {
    let html = fetch_url(client, url.as_str(), user_agents.pick())
        .await
        .into_body(url.as_str())?;

    extract_detail_body(&html, schema, max_chars).ok_or_else(|| HarvestError::MissingContent {
        url: url.to_string(),
    })
}
