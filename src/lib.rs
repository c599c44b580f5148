//! Ideas Harvester: a bounded, time-windowed scraper for TradingView ideas
//!
//! This crate fetches the "recent ideas" listing page, extracts one record per
//! post card, keeps the posts published within a recency window, and streams
//! a capped number of normalized [`Item`]s to the caller.

pub mod config;
pub mod harvester;
pub mod item;
pub mod links;
pub mod recency;
pub mod text;

use thiserror::Error;

/// Main error type for harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Invalid markup selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("No post cards found on {url}")]
    NoCards { url: String },

    #[error("No content container found on {url}")]
    MissingContent { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read parameter mapping: {0}")]
    Mapping(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, HarvesterConfig, QueryParameters, SchemaVersion};
pub use harvester::{query, Harvester};
pub use item::Item;
