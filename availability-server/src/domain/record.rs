//! Normalized availability records.
//!
//! One record describes one (train, fare class, date) combination after the
//! booking service's payload has been flattened and its nullable fields
//! resolved.

use std::fmt;

use chrono::Weekday;
use serde::{Serialize, Serializer};

/// Predicted chance of a waitlisted ticket confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prediction {
    /// The service gave no prediction. Rendered as `NA`.
    Unknown,
    /// Percentage, capped at 100. Values below zero pass through unchanged.
    Percent(i64),
}

impl Prediction {
    /// Build a prediction from a raw percentage, capping it at 100.
    pub fn capped(raw: i64) -> Self {
        Prediction::Percent(raw.min(100))
    }

    pub fn percent(&self) -> Option<i64> {
        match self {
            Prediction::Unknown => None,
            Prediction::Percent(p) => Some(*p),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Unknown => f.write_str("NA"),
            Prediction::Percent(p) => write!(f, "{p}"),
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Days of the week a train runs, always kept Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RunningDays(Vec<Weekday>);

impl RunningDays {
    /// Build from any collection of days; order and duplicates are normalized.
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(Weekday::num_days_from_monday);
        days.dedup();
        Self(days)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RunningDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(weekday_name(*day))?;
        }
        Ok(())
    }
}

impl Serialize for RunningDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One bookable (train, class, date) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub train_name: String,
    pub train_number: String,
    pub source_code: String,
    pub destination_code: String,
    pub journey_date: String,
    pub arrival_time: String,
    pub departure_time: String,
    /// `YYYY-MM-DD HH:MM:SS` in the local time zone.
    pub last_updated: String,
    /// Human-readable status such as `Available-0042` or `GNWL12/WL5`.
    pub availability: String,
    /// Raw status code as sent by the service, if any.
    pub status_code: Option<String>,
    pub prediction: Prediction,
    pub class_name: String,
    pub base_fare: Option<f64>,
    pub quota: String,
    pub running_days: RunningDays,
}
