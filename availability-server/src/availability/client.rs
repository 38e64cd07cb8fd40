//! Booking service HTTP client.
//!
//! Fetches trains between two stations together with per-class seat
//! availability for one travel date.

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use tracing::debug;

use crate::domain::{JourneyDate, StationCode};

use super::error::AvailabilityError;
use super::types::{RawTrainEntry, TrainsBetweenStations};

/// Default base URL for the booking service's rail API.
const DEFAULT_BASE_URL: &str = "https://railways.makemytrip.com/api";

/// Site the service expects requests to originate from.
const SITE_ORIGIN: &str = "https://www.makemytrip.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

/// Headers the booking service expects from a browser session.
///
/// Shared with the station autosuggest client, which sits behind the same
/// front door.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static("https://www.makemytrip.com/"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-site"),
    );
    headers
}

/// Configuration for the availability client.
#[derive(Debug, Clone)]
pub struct AvailabilityConfig {
    /// Base URL for the API (defaults to the production service)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AvailabilityConfig {
    /// Create a config pointing at the production service.
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

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Booking service API client.
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    http: reqwest::Client,
    base_url: String,
}

impl AvailabilityClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AvailabilityConfig) -> Result<Self, AvailabilityError> {
        let http = reqwest::Client::builder()
            .default_headers(browser_headers())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL for the trains-between-stations query of one leg.
    fn leg_url(&self, source: &StationCode, destination: &StationCode, date: JourneyDate) -> String {
        format!(
            "{}/tbsWithAvailabilityAndRecommendation/{}/{}/{}",
            self.base_url,
            source,
            destination,
            date.compact()
        )
    }

    /// Fetch trains with availability for one (source, destination, date).
    ///
    /// An absent or empty train list is reported as [`AvailabilityError::NoTrains`].
    pub async fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> Result<Vec<RawTrainEntry>, AvailabilityError> {
        let url = self.leg_url(source, destination, date);
        debug!(%url, "fetching trains");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AvailabilityError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AvailabilityError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AvailabilityError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_trains(&body)
    }
}

/// Parse a response body into its train list.
pub(crate) fn parse_trains(body: &str) -> Result<Vec<RawTrainEntry>, AvailabilityError> {
    let response: TrainsBetweenStations =
        serde_json::from_str(body).map_err(|e| AvailabilityError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

    match response.train_btwn_stns_list {
        Some(trains) if !trains.is_empty() => Ok(trains),
        _ => Err(AvailabilityError::NoTrains),
    }
}
