//! Configuration module for the harvester
//!
//! This module handles loading, parsing, and validating the TOML configuration
//! file, and reading query parameters from a loosely-typed mapping.
//!
//! # Example
//!
//! ```no_run
//! use ideas_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! println!("Collecting at most {} items", config.query.maximum_items_to_collect);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HarvesterConfig, QueryParameters, SchemaVersion, DEFAULT_BASE_URL,
    DEFAULT_LISTING_URL, DEFAULT_MAXIMUM_ITEMS, DEFAULT_MIN_POST_LENGTH, DEFAULT_OLDNESS_SECONDS,
    DEFAULT_USER_AGENTS,
};

// Re-export parser and validation functions
pub use parser::{load_config, parameters_from_mapping, parse_config};
pub use validation::{validate, validate_harvester_config, validate_query_parameters};
