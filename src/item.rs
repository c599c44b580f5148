//! The record handed to callers

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use url::Url;

/// Value of [`Item::domain`] for every record
pub const SOURCE_DOMAIN: &str = "tradingview.com";

/// Author recorded when a card names none
pub const UNKNOWN_AUTHOR: &str = "anonymous";

/// Timestamp layout used when an item is rendered
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.00Z";

/// One harvested post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(serialize_with = "serialize_created_at")]
    pub created_at: DateTime<Utc>,
    pub url: Url,
    pub domain: String,
}

impl Item {
    /// Builds an item; `content` is `"<title>. <body>"`
    ///
    /// Returns None if the title or body is blank.
    pub fn new(
        title: &str,
        body: &str,
        author: Option<&str>,
        created_at: DateTime<Utc>,
        url: Url,
    ) -> Option<Self> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() || body.is_empty() {
            return None;
        }

        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);

        Some(Self {
            title: title.to_string(),
            content: format!("{}. {}", title, body),
            author: author.to_string(),
            created_at,
            url,
            domain: SOURCE_DOMAIN.to_string(),
        })
    }

    /// `created_at` rendered as `2023-04-17T13:45:02.00Z`
    pub fn created_at_string(&self) -> String {
        format_created_at(&self.created_at)
    }
}

/// Renders an instant in the item timestamp layout
pub fn format_created_at(instant: &DateTime<Utc>) -> String {
    instant.format(CREATED_AT_FORMAT).to_string()
}

fn serialize_created_at<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_created_at(instant))
}
