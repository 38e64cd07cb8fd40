//! Flattening of booking service payloads into normalized records.
//!
//! Each train carries one availability entry per fare class per date. Every
//! entry becomes one [`NormalizedRecord`], except entries without a
//! human-readable status, which are resolved to the `WL999` sentinel and
//! dropped.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc, Weekday};
use serde_json::Value;
use tracing::debug;

use crate::domain::{NormalizedRecord, Prediction, RunningDays};

use super::types::{RawAvailabilityEntry, RawTrainEntry};

/// Status substituted when the service sends none. Such records are dropped.
pub const MISSING_STATUS: &str = "WL999";

/// Running flag value meaning "runs on this day".
const RUNS: &str = "Y";

const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error while normalizing a response. Discards the whole response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// `lastUpdatedOnRaw` is not a usable epoch-milliseconds number
    #[error("malformed timestamp for train {train}: {value}")]
    MalformedTimestamp { train: String, value: String },

    /// `predictionPercentage` is neither null nor an integer
    #[error("malformed prediction for train {train}: {value}")]
    MalformedPrediction { train: String, value: String },
}

/// Normalize one response, rendering timestamps in the local time zone.
pub fn extract_records(trains: &[RawTrainEntry]) -> Result<Vec<NormalizedRecord>, ExtractionError> {
    extract_records_in(trains, &Local)
}

/// Normalize one response, rendering timestamps in `tz`.
pub fn extract_records_in<Tz>(
    trains: &[RawTrainEntry],
    tz: &Tz,
) -> Result<Vec<NormalizedRecord>, ExtractionError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for train in trains {
        let running_days = running_days(train);

        for entry in &train.tbs_availability {
            let availability = resolve_status(entry.pretty_status.as_deref());

            let last_updated = format_last_updated(&entry.last_updated_on_raw, tz).ok_or_else(
                || ExtractionError::MalformedTimestamp {
                    train: train.train_number.clone(),
                    value: entry.last_updated_on_raw.to_string(),
                },
            )?;

            let prediction = parse_prediction(entry.prediction_percentage.as_ref()).ok_or_else(
                || ExtractionError::MalformedPrediction {
                    train: train.train_number.clone(),
                    value: entry
                        .prediction_percentage
                        .as_ref()
                        .map(Value::to_string)
                        .unwrap_or_default(),
                },
            )?;

            if availability == MISSING_STATUS {
                dropped += 1;
                continue;
            }

            records.push(build_record(
                train,
                entry,
                availability,
                last_updated,
                prediction,
                &running_days,
            ));
        }
    }

    debug!(
        trains = trains.len(),
        records = records.len(),
        dropped,
        "extracted availability records"
    );

    Ok(records)
}

fn build_record(
    train: &RawTrainEntry,
    entry: &RawAvailabilityEntry,
    availability: &str,
    last_updated: String,
    prediction: Prediction,
    running_days: &RunningDays,
) -> NormalizedRecord {
    NormalizedRecord {
        train_name: train.train_name.clone(),
        train_number: train.train_number.clone(),
        source_code: train.frm_stn_code.clone(),
        destination_code: train.to_stn_code.clone(),
        journey_date: entry.availability_date.clone(),
        arrival_time: train.arrival_time.clone(),
        departure_time: train.departure_time.clone(),
        last_updated,
        availability: availability.to_string(),
        status_code: entry.status_code.clone(),
        prediction,
        class_name: entry.class_type.clone().unwrap_or_default(),
        base_fare: parse_fare(entry.total_fare.as_ref()),
        quota: entry.quota.clone().unwrap_or_default(),
        running_days: running_days.clone(),
    }
}

/// Substitute the sentinel for a missing status.
fn resolve_status(status: Option<&str>) -> &str {
    status.unwrap_or(MISSING_STATUS)
}

/// Weekdays whose running flag is set, Monday first.
fn running_days(train: &RawTrainEntry) -> RunningDays {
    let flags = [
        (Weekday::Mon, &train.running_mon),
        (Weekday::Tue, &train.running_tue),
        (Weekday::Wed, &train.running_wed),
        (Weekday::Thu, &train.running_thu),
        (Weekday::Fri, &train.running_fri),
        (Weekday::Sat, &train.running_sat),
        (Weekday::Sun, &train.running_sun),
    ];

    RunningDays::new(
        flags
            .into_iter()
            .filter(|(_, flag)| flag.as_str() == RUNS)
            .map(|(day, _)| day),
    )
}

/// Render epoch milliseconds as `YYYY-MM-DD HH:MM:SS` in `tz`.
fn format_last_updated<Tz>(raw: &Value, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let millis = match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })?,
        _ => return None,
    };

    let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(
        utc.with_timezone(tz)
            .format(LAST_UPDATED_FORMAT)
            .to_string(),
    )
}

/// Fare as a number. Non-numeric values leave the cell blank.
fn parse_fare(raw: Option<&Value>) -> Option<f64> {
    let fare = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    fare.is_finite().then_some(fare)
}

/// Null means unknown; numbers and integer strings are capped at 100.
fn parse_prediction(raw: Option<&Value>) -> Option<Prediction> {
    let percent = match raw {
        None | Some(Value::Null) => return Some(Prediction::Unknown),
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })?,
        Some(Value::String(s)) => s.trim().parse::<i64>().ok()?,
        Some(_) => return None,
    };

    Some(Prediction::capped(percent))
}
