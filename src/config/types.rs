use serde::Deserialize;

/// Default maximum age of a post, in seconds
pub const DEFAULT_OLDNESS_SECONDS: u64 = 360;

/// Default cap on the number of items emitted per query
pub const DEFAULT_MAXIMUM_ITEMS: u64 = 25;

/// Default minimum body length, in characters
pub const DEFAULT_MIN_POST_LENGTH: u64 = 10;

/// Listing of the most recent ideas
pub const DEFAULT_LISTING_URL: &str = "https://www.tradingview.com/ideas/?sort=recent";

/// Scheme and host used to resolve relative permalinks
pub const DEFAULT_BASE_URL: &str = "https://www.tradingview.com";

/// Realistic browser signatures rotated across requests
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (iPad; CPU OS 12_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15",
];

/// Main configuration structure, as read from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryParameters,
    #[serde(default)]
    pub harvester: HarvesterConfig,
}

/// Per-invocation parameters supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryParameters {
    /// Maximum age of a post at evaluation time (seconds)
    pub max_oldness_seconds: u64,

    /// Hard cap on the number of items emitted
    pub maximum_items_to_collect: u64,

    /// Minimum length of a post body (characters, title excluded)
    pub min_post_length: u64,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            max_oldness_seconds: DEFAULT_OLDNESS_SECONDS,
            maximum_items_to_collect: DEFAULT_MAXIMUM_ITEMS,
            min_post_length: DEFAULT_MIN_POST_LENGTH,
        }
    }
}

/// Which layout of the site's markup to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Try every known layout, newest first
    #[default]
    Auto,
    /// `article` cards carrying an inline description
    Current,
    /// `div.tv-widget-idea` cards, body only on the detail page
    Legacy,
}

/// Host-owned settings for the fetch components
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvesterConfig {
    /// Page listing the most recent posts
    pub listing_url: String,

    /// Base for resolving relative permalinks
    pub base_url: String,

    /// Timeout applied to every individual request (seconds)
    pub request_timeout_secs: u64,

    /// Body text is cut to this many characters before cleaning
    pub max_content_chars: usize,

    /// Fetch the detail page when a card has no inline description
    pub fetch_details: bool,

    /// Markup layout to expect
    pub schema: SchemaVersion,

    /// Pool of `User-Agent` values, one picked at random per request
    pub user_agents: Vec<String>,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 8,
            max_content_chars: 800,
            fetch_details: true,
            schema: SchemaVersion::Auto,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
