//! Station autosuggest lookup.
//!
//! Turns free text typed by a user into at most three candidate stations,
//! each with the booking-system code the planner needs.

mod client;
mod error;

pub use client::{MAX_SUGGESTIONS, StationClient, StationClientConfig, StationSuggestion};
pub use error::{StationError, StationLookupError};
