//! Harvester module for listing and detail page processing
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with user-agent rotation
//! - Versioned markup signatures for cards and detail pages
//! - Card extraction and evaluation
//! - Detail page body retrieval
//! - Query orchestration and the item cap

mod cards;
mod coordinator;
mod detail;
mod fetcher;
mod schema;

pub use cards::{extract_cards, parse_listing, Candidate, Card, CardOutcome, Listing, SkipReason};
pub use coordinator::{query, Harvester};
pub use detail::{clean_body, extract_detail_body, fetch_detail_body};
pub use fetcher::{build_http_client, fetch_url, FetchResult, UserAgentPool};
pub use schema::{MarkupSchema, MarkupSignatures, CURRENT_SIGNATURES, LEGACY_SIGNATURES};
