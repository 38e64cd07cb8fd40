//! Web layer for the availability planner.
//!
//! Exposes station autosuggest, availability checks and ranked exports over
//! JSON HTTP endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, LEG_WARNINGS_HEADER, create_router};
pub use state::{AppState, TrainBackend};
