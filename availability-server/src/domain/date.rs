//! Journey dates and date selections.
//!
//! The booking service takes dates as compact `YYYYMMDD` strings, while
//! warnings shown to people use `DD-MM-YYYY`.

use std::fmt;

use chrono::{Days, NaiveDate};

/// Error returned when a date or date range is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The string is not a recognised date format.
    #[error("invalid date {0:?}: expected YYYYMMDD or YYYY-MM-DD")]
    Invalid(String),

    /// Range start falls after its end.
    #[error("end date must be after start date")]
    InvalidRange,
}

/// A calendar date of travel.
///
/// # Examples
///
/// ```
/// use availability_server::domain::JourneyDate;
///
/// let date = JourneyDate::parse("20241120").unwrap();
/// assert_eq!(date.compact(), "20241120");
/// assert_eq!(date.human(), "20-11-2024");
/// assert_eq!(JourneyDate::parse("2024-11-20").unwrap(), date);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JourneyDate(NaiveDate);

impl JourneyDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse `YYYYMMDD` or `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let s = s.trim();
        let format = if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
            "%Y%m%d"
        } else {
            "%Y-%m-%d"
        };

        NaiveDate::parse_from_str(s, format)
            .map(Self)
            .map_err(|_| DateError::Invalid(s.to_string()))
    }

    /// The `YYYYMMDD` form used in service URLs.
    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// The `DD-MM-YYYY` form used in warnings.
    pub fn human(&self) -> String {
        self.0.format("%d-%m-%Y").to_string()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Debug for JourneyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JourneyDate({})", self.compact())
    }
}

impl fmt::Display for JourneyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}

/// Either one travel date or an inclusive range of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    Single(JourneyDate),
    Range { start: JourneyDate, end: JourneyDate },
}

impl DateSelection {
    /// Expand the selection into its ordered list of dates.
    pub fn dates(&self) -> Result<Vec<JourneyDate>, DateError> {
        match *self {
            DateSelection::Single(date) => Ok(vec![date]),
            DateSelection::Range { start, end } => {
                if start > end {
                    return Err(DateError::InvalidRange);
                }
                let span = (end.0 - start.0).num_days() as u64;
                Ok((0..=span)
                    .filter_map(|offset| start.0.checked_add_days(Days::new(offset)))
                    .map(JourneyDate)
                    .collect())
            }
        }
    }
}
