//! Domain types for the seat availability planner.
//!
//! These types represent validated inputs (station codes, travel dates) and
//! the normalized availability rows produced from booking-service payloads.

mod date;
mod record;
mod station;

pub use date::{DateError, DateSelection, JourneyDate};
pub use record::{NormalizedRecord, Prediction, RunningDays, weekday_name};
pub use station::{InvalidStationCode, StationCode};
