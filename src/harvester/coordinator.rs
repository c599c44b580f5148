//! Query orchestration
//!
//! This module drives one harvest:
//! - Fetching and parsing the listing page
//! - Evaluating every card against the recency window
//! - Completing accepted cards with their body text
//! - Emitting items lazily, up to the configured cap
//!
//! The returned stream does no work until it is polled. Once the cap is
//! reached it is never polled again, so no request is issued past that point.

use crate::config::{HarvesterConfig, QueryParameters};
use crate::harvester::cards::{parse_listing, Candidate, CardOutcome, Listing};
use crate::harvester::detail::{clean_body, fetch_detail_body};
use crate::harvester::fetcher::{build_http_client, fetch_url, UserAgentPool};
use crate::harvester::schema::MarkupSchema;
use crate::item::Item;
use crate::{ConfigError, HarvestError};
use async_stream::stream;
use chrono::Utc;
use futures::{Stream, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Harvester for the site's recent-ideas listing
///
/// Cheap to clone; clones share the HTTP client and compiled selectors.
#[derive(Clone)]
pub struct Harvester {
    config: Arc<HarvesterConfig>,
    schemas: Arc<Vec<MarkupSchema>>,
    client: Client,
    base_url: Url,
    user_agents: UserAgentPool,
}

impl Harvester {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - Fetch settings: URLs, timeout, user agents, layout
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run queries
    /// * `Err(HarvestError)` - Invalid settings or HTTP client failure
    pub fn new(config: HarvesterConfig) -> Result<Self, HarvestError> {
        crate::config::validate_harvester_config(&config)?;

        let base_url = Url::parse(&config.base_url)?;
        let schemas = MarkupSchema::for_version(config.schema)?;
        let user_agents = UserAgentPool::new(config.user_agents.clone()).ok_or_else(|| {
            ConfigError::Validation("user_agents must contain at least one entry".to_string())
        })?;
        let client = build_http_client(&config)?;

        Ok(Self {
            config: Arc::new(config),
            schemas: Arc::new(schemas),
            client,
            base_url,
            user_agents,
        })
    }

    /// Runs one query and streams the resulting items
    ///
    /// Items come in listing order. At most
    /// `params.maximum_items_to_collect` are produced; the stream ends
    /// early, and empty, if the listing cannot be fetched.
    pub fn query(&self, params: QueryParameters) -> impl Stream<Item = Item> + Send + 'static {
        tracing::info!(
            "Scraping ideas posted less than {} seconds ago",
            params.max_oldness_seconds
        );

        let cap = usize::try_from(params.maximum_items_to_collect).unwrap_or(usize::MAX);
        let mut emitted = 0usize;

        self.scan(params).take(cap).inspect(move |item| {
            emitted += 1;
            tracing::info!(
                "Found new post ({}/{}): {}, posted at {}, URL = {}",
                emitted,
                cap,
                item.title,
                item.created_at_string(),
                item.url
            );
        })
    }

    /// Lazily walks the listing, one card at a time
    fn scan(&self, params: QueryParameters) -> impl Stream<Item = Item> + Send + 'static {
        let harvester = self.clone();

        stream! {
            let listing = match harvester.fetch_listing().await {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::error!("Failed to fetch listing: {}", e);
                    return;
                }
            };

            let schema = &harvester.schemas[listing.schema];
            tracing::debug!(
                "Listing has {} cards ({} layout)",
                listing.cards.len(),
                schema.name()
            );

            for card in listing.cards {
                match card.evaluate(&harvester.base_url, params.max_oldness_seconds, Utc::now()) {
                    CardOutcome::Skipped(reason) => {
                        tracing::debug!("Skipping card: {}", reason);
                    }
                    CardOutcome::Accepted(candidate) => {
                        if let Some(item) = harvester.complete(candidate, schema, &params).await {
                            yield item;
                        }
                    }
                }
            }
        }
    }

    /// Fetches and parses the listing page
    async fn fetch_listing(&self) -> Result<Listing, HarvestError> {
        let url = self.config.listing_url.as_str();
        tracing::debug!("Fetching listing: {}", url);

        let html = fetch_url(&self.client, url, self.user_agents.pick())
            .await
            .into_body(url)?;

        parse_listing(&html, &self.schemas).ok_or_else(|| HarvestError::NoCards {
            url: url.to_string(),
        })
    }

    /// Attaches body text to an accepted card and builds the item
    ///
    /// The inline description is used when present; otherwise the detail
    /// page is fetched, if enabled. Cards whose body cannot be obtained or
    /// is shorter than `min_post_length` characters are dropped.
    async fn complete(
        &self,
        candidate: Candidate,
        schema: &MarkupSchema,
        params: &QueryParameters,
    ) -> Option<Item> {
        let max_chars = self.config.max_content_chars;

        let inline = candidate
            .snippet
            .as_deref()
            .and_then(|snippet| clean_body(snippet, max_chars));

        let body = match inline {
            Some(body) => body,
            None if self.config.fetch_details => {
                match fetch_detail_body(
                    &self.client,
                    &candidate.url,
                    &self.user_agents,
                    schema,
                    max_chars,
                )
                .await
                {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!("Dropping {}: {}", candidate.url, e);
                        return None;
                    }
                }
            }
            None => {
                tracing::debug!("Dropping {}: no inline description", candidate.url);
                return None;
            }
        };

        let length = body.chars().count() as u64;
        if length < params.min_post_length {
            tracing::debug!(
                "Dropping {}: body has {} characters, minimum is {}",
                candidate.url,
                length,
                params.min_post_length
            );
            return None;
        }

        Item::new(
            &candidate.title,
            &body,
            candidate.author.as_deref(),
            candidate.created_at,
            candidate.url,
        )
    }
}

/// Runs one query with a freshly built [`Harvester`]
///
/// Never fails: invalid settings are logged and produce an empty stream.
///
/// # Example
///
/// ```no_run
/// use futures::StreamExt;
/// use ideas_harvester::{query, HarvesterConfig, QueryParameters};
///
/// # async fn example() {
/// let params = QueryParameters {
///     max_oldness_seconds: 10_000,
///     maximum_items_to_collect: 1,
///     ..Default::default()
/// };
///
/// let items: Vec<_> = query(HarvesterConfig::default(), params).collect().await;
/// assert!(items.len() <= 1);
/// # }
/// ```
pub fn query(config: HarvesterConfig, params: QueryParameters) -> impl Stream<Item = Item> + Send + 'static {
    stream! {
        let harvester = match Harvester::new(config) {
            Ok(harvester) => harvester,
            Err(e) => {
                tracing::error!("Failed to initialize harvester: {}", e);
                return;
            }
        };

        let items = harvester.query(params);
        futures::pin_mut!(items);
        while let Some(item) = items.next().await {
            yield item;
        }
    }
}
