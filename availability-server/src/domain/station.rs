//! Station code types.

use std::fmt;

use serde::Serialize;

/// Longest station code accepted by the booking service.
const MAX_CODE_LEN: usize = 8;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code {code:?}: {reason}")]
pub struct InvalidStationCode {
    code: String,
    reason: &'static str,
}

/// A booking-system station code such as `NDLS` or `BCT`.
///
/// Codes are 1 to 8 uppercase ASCII letters or digits. This type guarantees
/// that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use availability_server::domain::StationCode;
///
/// let ndls = StationCode::parse("NDLS").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
///
/// // Lowercase is rejected unless normalized first
/// assert!(StationCode::parse("ndls").is_err());
/// assert_eq!(StationCode::parse_normalized(" ndls ").unwrap(), ndls);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1 to 8 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let invalid = |reason| InvalidStationCode {
            code: s.to_string(),
            reason,
        };

        if s.is_empty() || s.len() > MAX_CODE_LEN {
            return Err(invalid("must be 1 to 8 characters"));
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(invalid("must be uppercase ASCII letters or digits"));
        }

        Ok(Self(s.to_string()))
    }

    /// Parse after trimming whitespace and uppercasing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("NDLS").is_ok());
        assert!(StationCode::parse("BCT").is_ok());
        assert!(StationCode::parse("R").is_ok());
        assert!(StationCode::parse("KOAA").is_ok());
        assert!(StationCode::parse("ST2").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(StationCode::parse("ndls").is_err());
        assert!(StationCode::parse("Ndls").is_err());
    }

    #[test]
    fn reject_bad_length() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("ABCDEFGHI").is_err());
    }

    #[test]
    fn reject_punctuation() {
        assert!(StationCode::parse("N-LS").is_err());
        assert!(StationCode::parse("N LS").is_err());
        assert!(StationCode::parse("NÖLS").is_err());
    }

    #[test]
    fn normalized_trims_and_uppercases() {
        let code = StationCode::parse_normalized("  bct\n").unwrap();
        assert_eq!(code.as_str(), "BCT");
    }

    #[test]
    fn error_names_the_input() {
        let err = StationCode::parse("a b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid station code \"a b\": must be uppercase ASCII letters or digits"
        );
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("NDLS").unwrap();
        assert_eq!(format!("{code}"), "NDLS");
        assert_eq!(format!("{code:?}"), "StationCode(NDLS)");
    }
}
