//! Station autosuggest API client.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::browser_headers;
use crate::domain::StationCode;

use super::error::{StationError, StationLookupError};

/// Default base URL for the autosuggest API.
const DEFAULT_BASE_URL: &str = "https://ground-auto-suggest.makemytrip.com";

/// Suggestions requested from the API per query.
const REQUEST_LIMIT: usize = 15;

/// Suggestions returned to callers per query.
pub const MAX_SUGGESTIONS: usize = 3;

/// Autosuggest response wrapper.
#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    pub data: SuggestData,
}

#[derive(Debug, Deserialize)]
pub struct SuggestData {
    pub r: Vec<SuggestionDto>,
}

/// Minimal DTO for one suggestion - we only need the name and code.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionDto {
    /// Display name, e.g. "Mumbai Central, Mumbai".
    pub dn: String,
    pub irctc_code: String,
}

/// A station the user can pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSuggestion {
    pub display_name: String,
    pub code: StationCode,
}

/// Configuration for the station client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the station autosuggest API.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Create a new station client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .default_headers(browser_headers())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up stations matching `query`, best match first, at most three.
    pub async fn suggest(&self, query: &str) -> Result<Vec<StationSuggestion>, StationLookupError> {
        self.fetch_suggestions(query)
            .await
            .map_err(|e| StationLookupError::new(query, e))
    }

    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<StationSuggestion>, StationError> {
        let url = format!("{}/rails/autosuggest/stations", self.base_url);
        debug!(query, "looking up stations");

        let limit = REQUEST_LIMIT.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("version", "v1"),
                ("search_query", query),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_suggestions(&body)
    }
}

/// Parse an autosuggest body, keeping the first [`MAX_SUGGESTIONS`].
fn parse_suggestions(body: &str) -> Result<Vec<StationSuggestion>, StationError> {
    let response: SuggestResponse =
        serde_json::from_str(body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    response
        .data
        .r
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|dto| {
            let code = StationCode::parse_normalized(&dto.irctc_code).map_err(|e| {
                StationError::Malformed {
                    message: e.to_string(),
                }
            })?;
            Ok(StationSuggestion {
                display_name: dto.dn,
                code,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StationClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_base_url() {
        let config = StationClientConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn truncates_to_three() {
        let body = r#"{"data": {"r": [
            {"dn": "Mumbai Central", "irctc_code": "MMCT"},
            {"dn": "Mumbai CST", "irctc_code": "CSMT"},
            {"dn": "Mumbai Bandra Terminus", "irctc_code": "BDTS"},
            {"dn": "Mumbai LTT", "irctc_code": "LTT"}
        ]}}"#;

        let suggestions = parse_suggestions(body).unwrap();
        let codes: Vec<&str> = suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["MMCT", "CSMT", "BDTS"]);
        assert_eq!(suggestions[0].display_name, "Mumbai Central");
    }

    #[test]
    fn empty_result_is_ok() {
        let suggestions = parse_suggestions(r#"{"data": {"r": []}}"#).unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn missing_fields_are_json_errors() {
        let err = parse_suggestions(r#"{"data": {"r": [{"dn": "X"}]}}"#).unwrap_err();
        assert!(matches!(err, StationError::Json { .. }));
    }

    #[test]
    fn bad_code_is_malformed() {
        let err =
            parse_suggestions(r#"{"data": {"r": [{"dn": "X", "irctc_code": "A-B"}]}}"#).unwrap_err();
        assert!(matches!(err, StationError::Malformed { .. }));
    }
}
