//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the harvester:
//! - Building the HTTP client with the configured timeout
//! - Rotating the `User-Agent` header across requests
//! - GET requests for the listing page and detail pages
//! - Error classification
//!
//! Failures are never retried.

use crate::config::HarvesterConfig;
use crate::HarvestError;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the configured timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Converts the outcome into the page body or a typed error
    pub fn into_body(self, url: &str) -> Result<String, HarvestError> {
        match self {
            FetchResult::Success { body, .. } => Ok(body),
            FetchResult::HttpError { status_code } => Err(HarvestError::Status {
                url: url.to_string(),
                status_code,
            }),
            FetchResult::NetworkError {
                timed_out: true, ..
            } => Err(HarvestError::Timeout {
                url: url.to_string(),
            }),
            FetchResult::NetworkError { error, .. } => Err(HarvestError::Network {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Pool of browser signatures, one drawn uniformly at random per request
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    /// Creates a pool; returns None when `agents` is empty
    pub fn new(agents: Vec<String>) -> Option<Self> {
        if agents.is_empty() {
            None
        } else {
            Some(Self { agents })
        }
    }

    /// Picks one signature at random
    pub fn pick(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Builds an HTTP client with proper configuration
///
/// No default `User-Agent` is set here: every request carries one drawn
/// from the [`UserAgentPool`]. Cookies are not stored.
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use ideas_harvester::config::HarvesterConfig;
/// use ideas_harvester::harvester::build_http_client;
///
/// let client = build_http_client(&HarvesterConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HarvesterConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `user_agent` - Value of the `User-Agent` header for this request
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str, user_agent: &str) -> FetchResult {
    match client.get(url).header(USER_AGENT, user_agent).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            // Classify error
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    timed_out: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                    timed_out: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HarvesterConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(UserAgentPool::new(Vec::new()).is_none());
    }

    #[test]
    fn test_pick_from_pool() {
        let agents = vec!["AgentA/1.0".to_string(), "AgentB/2.0".to_string()];
        let pool = UserAgentPool::new(agents.clone()).unwrap();

        assert_eq!(pool.len(), 2);
        for _ in 0..20 {
            let picked = pool.pick();
            assert!(agents.iter().any(|a| a == picked));
        }
    }

    #[test]
    fn test_into_body() {
        let ok = FetchResult::Success {
            final_url: "https://example.com/".to_string(),
            status_code: 200,
            body: "<html></html>".to_string(),
        };
        assert_eq!(ok.into_body("https://example.com/").unwrap(), "<html></html>");

        let status = FetchResult::HttpError { status_code: 503 };
        assert!(matches!(
            status.into_body("https://example.com/"),
            Err(HarvestError::Status { status_code: 503, .. })
        ));

        let timeout = FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        };
        assert!(matches!(
            timeout.into_body("https://example.com/"),
            Err(HarvestError::Timeout { .. })
        ));

        let refused = FetchResult::NetworkError {
            error: "Connection refused".to_string(),
            timed_out: false,
        };
        assert!(matches!(
            refused.into_body("https://example.com/"),
            Err(HarvestError::Network { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = build_http_client(&HarvesterConfig::default()).unwrap();
        // Port 9 (discard) is closed on test machines
        let result = fetch_url(&client, "http://127.0.0.1:9/", "TestAgent/1.0").await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
