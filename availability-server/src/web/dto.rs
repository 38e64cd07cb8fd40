//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DateSelection, JourneyDate, NormalizedRecord, StationCode};
use crate::export::ExportFormat;
use crate::planner::PlanRequest;
use crate::stations::StationSuggestion;

/// Query for station autosuggest.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Free text typed by the user
    pub q: String,
}

/// A station in autosuggest results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    /// Booking-system station code
    pub code: String,

    /// Display name
    pub name: String,
}

impl From<StationSuggestion> for StationSearchResult {
    fn from(s: StationSuggestion) -> Self {
        Self {
            code: s.code.to_string(),
            name: s.display_name,
        }
    }
}

/// Response from station autosuggest.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Request to check availability.
///
/// Either `date` or both `start_date` and `end_date` must be given. Dates
/// are `YYYYMMDD` or `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    /// Boarding station codes; blank entries are ignored
    pub sources: Vec<String>,

    /// Alighting station codes; blank entries are ignored
    pub destinations: Vec<String>,

    /// Single travel date
    pub date: Option<String>,

    /// First date of a range (inclusive)
    pub start_date: Option<String>,

    /// Last date of a range (inclusive)
    pub end_date: Option<String>,

    /// Download format for the export endpoint
    #[serde(default)]
    pub format: ExportFormat,
}

impl AvailabilityRequest {
    /// Which dates were asked for.
    pub fn date_selection(&self) -> Result<DateSelection, String> {
        let parse = |s: &str| JourneyDate::parse(s).map_err(|e| e.to_string());

        match (&self.date, &self.start_date, &self.end_date) {
            (Some(date), None, None) => Ok(DateSelection::Single(parse(date)?)),
            (None, Some(start), Some(end)) => Ok(DateSelection::Range {
                start: parse(start)?,
                end: parse(end)?,
            }),
            (None, _, _) => Err("please select both start and end dates".to_string()),
            _ => Err("give either date or start_date and end_date, not both".to_string()),
        }
    }

    /// Validate codes and dates into a planner request.
    pub fn to_plan_request(&self) -> Result<PlanRequest, String> {
        let codes = |raw: &[String]| -> Result<Vec<StationCode>, String> {
            raw.iter()
                .filter(|s| !s.trim().is_empty())
                .map(|s| StationCode::parse_normalized(s).map_err(|e| e.to_string()))
                .collect()
        };

        let sources = codes(&self.sources)?;
        let destinations = codes(&self.destinations)?;
        let dates = self
            .date_selection()?
            .dates()
            .map_err(|e| e.to_string())?;

        Ok(PlanRequest::new(sources, destinations, dates))
    }
}

/// Response from an availability check.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    /// Ranked records, best first
    pub records: Vec<NormalizedRecord>,

    /// One message per failed leg
    pub warnings: Vec<String>,

    /// Number of legs queried
    pub legs: usize,

    /// True when no leg produced a usable record
    pub no_results: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
