use crate::config::types::{Config, HarvesterConfig, QueryParameters};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_query_parameters(&config.query)?;
    validate_harvester_config(&config.harvester)?;
    Ok(())
}

/// Validates caller-supplied query parameters
pub fn validate_query_parameters(params: &QueryParameters) -> Result<(), ConfigError> {
    if params.max_oldness_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "max_oldness_seconds must be >= 1, got {}",
            params.max_oldness_seconds
        )));
    }

    if params.maximum_items_to_collect < 1 {
        return Err(ConfigError::Validation(format!(
            "maximum_items_to_collect must be >= 1, got {}",
            params.maximum_items_to_collect
        )));
    }

    if params.min_post_length < 1 {
        return Err(ConfigError::Validation(format!(
            "min_post_length must be >= 1, got {}",
            params.min_post_length
        )));
    }

    Ok(())
}

/// Validates the fetch settings
pub fn validate_harvester_config(config: &HarvesterConfig) -> Result<(), ConfigError> {
    validate_http_url("listing_url", &config.listing_url)?;

    let base = validate_http_url("base_url", &config.base_url)?;
    if base.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' cannot be used to resolve relative links",
            config.base_url
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_content_chars < 1 {
        return Err(ConfigError::Validation(format!(
            "max_content_chars must be >= 1, got {}",
            config.max_content_chars
        )));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents must contain at least one entry".to_string(),
        ));
    }

    if config.user_agents.iter().any(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user_agents cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Parses a URL and requires an HTTP(S) scheme
fn validate_http_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, value
        )));
    }

    Ok(url)
}
