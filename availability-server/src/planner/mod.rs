//! Availability planning across stations and dates.
//!
//! This module answers: "Across all of these boarding and alighting
//! stations and these dates, which seats are easiest to book?"
//!
//! The query planner fans out over every leg and gathers normalized records;
//! the ranker then orders the whole set by booking desirability.

mod config;
mod query;
mod rank;

pub use config::{PlannerConfig, PlannerLimits, RankPolicy, TierRule};
pub use query::{
    Leg, LegError, LegWarning, PlanError, PlanOutcome, PlanRequest, Progress, QueryPlanner,
    TrainSource,
};
pub use rank::{SortKey, rank_records, sort_key};
