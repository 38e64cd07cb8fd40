//! Seat availability server.
//!
//! Answers: "Across these boarding stations, alighting stations and dates,
//! which train seats are easiest to book?" Results are ranked by booking
//! desirability and can be downloaded as a spreadsheet or CSV.

pub mod availability;
pub mod config;
pub mod domain;
pub mod export;
pub mod planner;
pub mod stations;
pub mod web;
