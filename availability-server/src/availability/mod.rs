//! Booking service availability client.
//!
//! This module fetches trains between two stations for one travel date and
//! flattens the response into [`crate::domain::NormalizedRecord`]s.
//!
//! Key characteristics of the service:
//! - One availability entry per fare class per date, nested under each train
//! - Human-readable status and prediction are frequently null
//! - Timestamps arrive as epoch milliseconds
//! - No trains is signalled by a missing or empty list rather than a 404

mod client;
mod error;
mod extract;
mod mock;
mod types;

pub use client::{AvailabilityClient, AvailabilityConfig};
pub use error::AvailabilityError;
pub use extract::{ExtractionError, MISSING_STATUS, extract_records, extract_records_in};
pub use mock::MockAvailabilityClient;
pub use types::{RawAvailabilityEntry, RawTrainEntry, TrainsBetweenStations};

pub(crate) use client::browser_headers;
