use crate::config::types::{Config, QueryParameters};
use crate::config::validation::{validate, validate_query_parameters};
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ideas_harvester::config::load_config;
///
/// let config = load_config(Path::new("harvester.toml")).unwrap();
/// println!("Max age: {}s", config.query.max_oldness_seconds);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration held in memory
///
/// Missing tables and keys fall back to their defaults, so an empty
/// string is a valid configuration.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}

/// Reads query parameters from a loosely-typed mapping
///
/// Anything other than a JSON object (including `null`) yields the defaults.
/// Unknown keys are ignored; recognized keys must hold positive integers.
///
/// # Example
///
/// ```
/// use ideas_harvester::config::parameters_from_mapping;
///
/// let params = parameters_from_mapping(&serde_json::json!({
///     "max_oldness_seconds": 10000,
///     "maximum_items_to_collect": 1
/// }))
/// .unwrap();
/// assert_eq!(params.maximum_items_to_collect, 1);
/// assert_eq!(params.min_post_length, 10);
/// ```
pub fn parameters_from_mapping(mapping: &serde_json::Value) -> Result<QueryParameters, ConfigError> {
    if !mapping.is_object() {
        return Ok(QueryParameters::default());
    }

    let params: QueryParameters = serde_json::from_value(mapping.clone())?;
    validate_query_parameters(&params)?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaVersion;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[query]
max_oldness_seconds = 600
maximum_items_to_collect = 5
min_post_length = 20

[harvester]
listing_url = "https://example.com/ideas/?sort=recent"
base_url = "https://example.com"
request_timeout_secs = 3
schema = "legacy"
fetch_details = false
user_agents = ["TestAgent/1.0"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.query.max_oldness_seconds, 600);
        assert_eq!(config.query.maximum_items_to_collect, 5);
        assert_eq!(config.query.min_post_length, 20);
        assert_eq!(config.harvester.base_url, "https://example.com");
        assert_eq!(config.harvester.request_timeout_secs, 3);
        assert_eq!(config.harvester.schema, SchemaVersion::Legacy);
        assert!(!config.harvester.fetch_details);
        assert_eq!(config.harvester.user_agents, vec!["TestAgent/1.0"]);
        // Not set in the file
        assert_eq!(config.harvester.max_content_chars, 800);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.query, QueryParameters::default());
        assert_eq!(config.query.max_oldness_seconds, 360);
        assert_eq!(config.query.maximum_items_to_collect, 25);
        assert_eq!(config.harvester.schema, SchemaVersion::Auto);
        assert_eq!(config.harvester.user_agents.len(), 8);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvester.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_negative_value_is_parse_error() {
        let result = parse_config("[query]\nmax_oldness_seconds = -5\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let result = parse_config("[query]\nmaximum_items_to_collect = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let result = parse_config("[harvester]\nschema = \"v3\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_mapping_partial_keys() {
        let params = parameters_from_mapping(&json!({
            "max_oldness_seconds": 10000,
            "maximum_items_to_collect": 1
        }))
        .unwrap();

        assert_eq!(params.max_oldness_seconds, 10000);
        assert_eq!(params.maximum_items_to_collect, 1);
        assert_eq!(params.min_post_length, 10);
    }

    #[test]
    fn test_mapping_ignores_unknown_keys() {
        let params = parameters_from_mapping(&json!({ "keywords": ["btc"] })).unwrap();
        assert_eq!(params, QueryParameters::default());
    }

    #[test]
    fn test_non_object_mapping_uses_defaults() {
        assert_eq!(
            parameters_from_mapping(&serde_json::Value::Null).unwrap(),
            QueryParameters::default()
        );
        assert_eq!(
            parameters_from_mapping(&json!([1, 2, 3])).unwrap(),
            QueryParameters::default()
        );
    }

    #[test]
    fn test_mapping_with_wrong_type() {
        let result = parameters_from_mapping(&json!({ "maximum_items_to_collect": "many" }));
        assert!(matches!(result, Err(ConfigError::Mapping(_))));
    }

    #[test]
    fn test_mapping_with_zero_cap() {
        let result = parameters_from_mapping(&json!({ "maximum_items_to_collect": 0 }));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
