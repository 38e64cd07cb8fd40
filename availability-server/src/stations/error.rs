//! Station lookup error types.

/// Errors that can occur when querying the station autosuggest API.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A suggestion carried an unusable station code
    #[error("malformed suggestion: {message}")]
    Malformed { message: String },
}

/// A failed lookup, carrying the query that triggered it.
#[derive(Debug, thiserror::Error)]
#[error("error fetching station code for query '{query}': {source}")]
pub struct StationLookupError {
    pub query: String,
    #[source]
    pub source: StationError,
}

impl StationLookupError {
    pub fn new(query: impl Into<String>, source: StationError) -> Self {
        Self {
            query: query.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn lookup_error_names_query_and_cause() {
        let err = StationLookupError::new(
            "mumb",
            StationError::Api {
                status: 503,
                message: "unavailable".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "error fetching station code for query 'mumb': API error 503: unavailable"
        );
        assert!(err.source().is_some());
    }
}
