//! Card extraction for the listing page
//!
//! Extraction runs in two steps. [`parse_listing`] pulls the raw fields of
//! every card out of the markup, and [`Card::evaluate`] turns each card into
//! an explicit [`CardOutcome`]. A malformed card only ever skips itself.

use crate::harvester::schema::MarkupSchema;
use crate::links::resolve_permalink;
use crate::recency::{is_within_age, parse_timestamp};
use crate::text::normalize_text;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use std::fmt;
use url::Url;

/// Raw fields of one card, as found in the markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub timestamp: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    pub snippet: Option<String>,
}

/// Cards of a listing page, with the layout that matched them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Index of the matching layout in the schema list
    pub schema: usize,
    pub cards: Vec<Card>,
}

/// A card that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub url: Url,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub snippet: Option<String>,
}

/// Why a card produced no item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingTimestamp,
    UnparsableTimestamp(String),
    TooOld(DateTime<Utc>),
    MissingTitle,
    MissingLink,
    InvalidLink(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTimestamp => write!(f, "no timestamp"),
            SkipReason::UnparsableTimestamp(raw) => write!(f, "unparsable timestamp '{}'", raw),
            SkipReason::TooOld(created_at) => write!(f, "posted at {}, outside the window", created_at),
            SkipReason::MissingTitle => write!(f, "no title"),
            SkipReason::MissingLink => write!(f, "no link"),
            SkipReason::InvalidLink(href) => write!(f, "unusable link '{}'", href),
        }
    }
}

/// Result of evaluating one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Accepted(Candidate),
    Skipped(SkipReason),
}

/// Parses a listing page and extracts its cards
///
/// The layouts in `schemas` are tried in order; the first one matching at
/// least one card wins. Returns None when no layout matches.
///
/// # Example
///
/// ```
/// use ideas_harvester::config::SchemaVersion;
/// use ideas_harvester::harvester::{parse_listing, MarkupSchema};
///
/// let schemas = MarkupSchema::for_version(SchemaVersion::Auto).unwrap();
/// let html = r#"<div class="tv-widget-idea js-userlink-popup-anchor">
///     <span data-timestamp="1681739102"></span></div>"#;
///
/// let listing = parse_listing(html, &schemas).unwrap();
/// assert_eq!(schemas[listing.schema].name(), "legacy");
/// assert_eq!(listing.cards.len(), 1);
/// ```
pub fn parse_listing(html: &str, schemas: &[MarkupSchema]) -> Option<Listing> {
    let document = Html::parse_document(html);

    schemas.iter().enumerate().find_map(|(index, schema)| {
        let cards = extract_cards(&document, schema);
        if cards.is_empty() {
            None
        } else {
            Some(Listing {
                schema: index,
                cards,
            })
        }
    })
}

/// Extracts the raw fields of every card, in document order
pub fn extract_cards(document: &Html, schema: &MarkupSchema) -> Vec<Card> {
    schema
        .card_blocks(document)
        .map(|block| read_card(block, schema))
        .collect()
}

fn read_card(block: ElementRef<'_>, schema: &MarkupSchema) -> Card {
    Card {
        timestamp: schema.timestamp_of(block),
        title: schema.title_of(block),
        link: schema.link_of(block),
        author: schema.author_of(block),
        snippet: schema.snippet_of(block),
    }
}

impl Card {
    /// Checks a card's fields and decides whether it becomes an item
    ///
    /// Checks run in this order: timestamp present, timestamp parses,
    /// timestamp within `max_oldness_seconds` of `now`, title present,
    /// link present and resolvable against `base_url`. A missing author is
    /// not a reason to skip.
    pub fn evaluate(self, base_url: &Url, max_oldness_seconds: u64, now: DateTime<Utc>) -> CardOutcome {
        let raw_timestamp = match self.timestamp {
            Some(raw) => raw,
            None => return CardOutcome::Skipped(SkipReason::MissingTimestamp),
        };

        let created_at = match parse_timestamp(&raw_timestamp) {
            Some(instant) => instant,
            None => return CardOutcome::Skipped(SkipReason::UnparsableTimestamp(raw_timestamp)),
        };

        if !is_within_age(created_at, max_oldness_seconds, now) {
            return CardOutcome::Skipped(SkipReason::TooOld(created_at));
        }

        let title = match self.title.map(|t| normalize_text(&t)) {
            Some(title) if !title.is_empty() => title,
            _ => return CardOutcome::Skipped(SkipReason::MissingTitle),
        };

        let href = match self.link {
            Some(href) => href,
            None => return CardOutcome::Skipped(SkipReason::MissingLink),
        };

        let url = match resolve_permalink(&href, base_url) {
            Some(url) => url,
            None => return CardOutcome::Skipped(SkipReason::InvalidLink(href)),
        };

        CardOutcome::Accepted(Candidate {
            title,
            url,
            author: self.author,
            created_at,
            snippet: self.snippet,
        })
    }
}
