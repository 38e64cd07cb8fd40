//! Mock availability client for running without the live service.
//!
//! Loads saved response bodies from JSON files and serves them as if they
//! were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{JourneyDate, StationCode};

use super::client::parse_trains;
use super::error::AvailabilityError;
use super::types::RawTrainEntry;

/// Key for a saved response. `None` date matches any date.
type LegKey = (StationCode, StationCode, Option<JourneyDate>);

/// Mock client that serves data from JSON files.
///
/// Files are named `{SRC}_{DST}_{YYYYMMDD}.json` for a specific date or
/// `{SRC}_{DST}.json` for every date. Date-specific files win.
#[derive(Debug, Clone)]
pub struct MockAvailabilityClient {
    responses: Arc<HashMap<LegKey, String>>,
}

impl MockAvailabilityClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, AvailabilityError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            AvailabilityError::MockData(format!("failed to read {}: {e}", data_dir.display()))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                AvailabilityError::MockData(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| AvailabilityError::MockData(format!("invalid filename: {path:?}")))?;

            let key = parse_file_stem(stem).ok_or_else(|| {
                AvailabilityError::MockData(format!("unrecognised mock file name: {stem}"))
            })?;

            let body = std::fs::read_to_string(&path).map_err(|e| {
                AvailabilityError::MockData(format!("failed to read {}: {e}", path.display()))
            })?;

            responses.insert(key, body);
        }

        if responses.is_empty() {
            return Err(AvailabilityError::MockData(format!(
                "no mock response files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            responses: Arc::new(responses),
        })
    }

    /// Mimics [`super::AvailabilityClient::fetch_trains`].
    pub async fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> Result<Vec<RawTrainEntry>, AvailabilityError> {
        let dated = (source.clone(), destination.clone(), Some(date));
        let any_date = (source.clone(), destination.clone(), None);

        let body = self
            .responses
            .get(&dated)
            .or_else(|| self.responses.get(&any_date))
            .ok_or(AvailabilityError::NoTrains)?;

        parse_trains(body)
    }

    /// Number of saved responses.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Parse `SRC_DST` or `SRC_DST_YYYYMMDD`.
fn parse_file_stem(stem: &str) -> Option<LegKey> {
    let parts: Vec<&str> = stem.split('_').collect();
    let (source, destination, date) = match parts.as_slice() {
        [src, dst] => (*src, *dst, None),
        [src, dst, date] => (*src, *dst, Some(JourneyDate::parse(date).ok()?)),
        _ => return None,
    };

    Some((
        StationCode::parse(source).ok()?,
        StationCode::parse(destination).ok()?,
        date,
    ))
}
