//! Errors from the trains-between-stations query.
//!
//! Every variant ends up as the reason text of a leg warning, so the
//! messages read as explanations of why one leg produced nothing.

use std::fmt;

/// Characters of an unreadable response body quoted in the error.
const BODY_EXCERPT_CHARS: usize = 120;

/// Why the trains for one leg could not be fetched.
#[derive(Debug)]
pub enum AvailabilityError {
    /// Transport failure, including timeouts
    Http(reqwest::Error),

    /// The body was not a trains-between-stations document
    Json {
        message: String,
        body: Option<String>,
    },

    /// Non-success status other than the ones below
    ApiError { status: u16, message: String },

    /// Train list absent or empty
    NoTrains,

    /// HTTP 429
    RateLimited,

    /// HTTP 401 or 403; usually the browser headers were refused
    Unauthorized,

    /// Saved responses could not be loaded
    MockData(String),
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityError::Http(e) => write!(f, "HTTP error: {e}"),
            AvailabilityError::Json { message, body } => {
                write!(f, "unreadable train list: {message}")?;
                match body.as_deref().map(str::trim) {
                    Some("") | None => Ok(()),
                    Some(body) => {
                        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
                        let ellipsis = if body.chars().count() > BODY_EXCERPT_CHARS {
                            "..."
                        } else {
                            ""
                        };
                        write!(f, " (response began {excerpt:?}{ellipsis})")
                    }
                }
            }
            AvailabilityError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            AvailabilityError::NoTrains => f.write_str("TrainNotFound"),
            AvailabilityError::RateLimited => {
                f.write_str("booking service is rate limiting requests")
            }
            AvailabilityError::Unauthorized => {
                f.write_str("booking service refused the request")
            }
            AvailabilityError::MockData(msg) => write!(f, "saved responses unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AvailabilityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AvailabilityError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AvailabilityError {
    fn from(err: reqwest::Error) -> Self {
        AvailabilityError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_trains_keeps_service_wording() {
        assert_eq!(AvailabilityError::NoTrains.to_string(), "TrainNotFound");
    }

    #[test]
    fn status_errors_carry_the_body() {
        let err = AvailabilityError::ApiError {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: unavailable");
    }

    #[test]
    fn maintenance_page_is_quoted_briefly() {
        let page = format!("<html>{}</html>", "down for maintenance ".repeat(20));
        let err = AvailabilityError::Json {
            message: "expected value at line 1 column 1".into(),
            body: Some(page),
        };

        let text = err.to_string();
        assert!(text.starts_with("unreadable train list: expected value at line 1 column 1"));
        assert!(text.contains("(response began \"<html>down for maintenance"));
        assert!(text.ends_with("...)"));
    }

    #[test]
    fn blank_body_is_not_quoted() {
        let err = AvailabilityError::Json {
            message: "EOF while parsing".into(),
            body: Some("  ".into()),
        };
        assert_eq!(err.to_string(), "unreadable train list: EOF while parsing");
    }

    #[test]
    fn only_transport_errors_have_a_source() {
        use std::error::Error;
        assert!(AvailabilityError::RateLimited.source().is_none());
        assert!(AvailabilityError::MockData("gone".into()).source().is_none());
    }
}
