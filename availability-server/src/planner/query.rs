//! Fan-out of availability queries over stations and dates.
//!
//! Every (source, destination, date) combination is fetched and extracted
//! on its own. A failing leg becomes a warning and never stops the run.

use std::fmt;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::availability::{
    AvailabilityClient, AvailabilityError, ExtractionError, MockAvailabilityClient, RawTrainEntry,
    extract_records,
};
use crate::domain::{JourneyDate, NormalizedRecord, StationCode};

use super::config::PlannerLimits;

/// Error from planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Invalid planning request
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),
}

/// Why a single leg produced no records.
#[derive(Debug, thiserror::Error)]
pub enum LegError {
    #[error(transparent)]
    Fetch(#[from] AvailabilityError),

    #[error(transparent)]
    Extract(#[from] ExtractionError),
}

/// Trait for fetching trains between two stations on one date.
///
/// This abstraction allows the planner to be tested with mock data.
pub trait TrainSource {
    fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> impl Future<Output = Result<Vec<RawTrainEntry>, AvailabilityError>> + Send;
}

impl TrainSource for AvailabilityClient {
    fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> impl Future<Output = Result<Vec<RawTrainEntry>, AvailabilityError>> + Send {
        AvailabilityClient::fetch_trains(self, source, destination, date)
    }
}

impl TrainSource for MockAvailabilityClient {
    fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> impl Future<Output = Result<Vec<RawTrainEntry>, AvailabilityError>> + Send {
        MockAvailabilityClient::fetch_trains(self, source, destination, date)
    }
}

/// One (source, destination, date) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leg {
    pub source: StationCode,
    pub destination: StationCode,
    pub date: JourneyDate,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} on {}",
            self.source,
            self.destination,
            self.date.human()
        )
    }
}

/// Request to query availability.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub sources: Vec<StationCode>,
    pub destinations: Vec<StationCode>,
    /// Travel dates in query order.
    pub dates: Vec<JourneyDate>,
}

impl PlanRequest {
    pub fn new(
        sources: Vec<StationCode>,
        destinations: Vec<StationCode>,
        dates: Vec<JourneyDate>,
    ) -> Self {
        Self {
            sources,
            destinations,
            dates,
        }
    }

    /// Validate the request against the planner limits.
    pub fn validate(&self, limits: &PlannerLimits) -> Result<(), PlanError> {
        if self.sources.is_empty() {
            return Err(PlanError::InvalidRequest(
                "at least one source station is required".to_string(),
            ));
        }

        if self.destinations.is_empty() {
            return Err(PlanError::InvalidRequest(
                "at least one destination station is required".to_string(),
            ));
        }

        if self.dates.is_empty() {
            return Err(PlanError::InvalidRequest(
                "at least one date is required".to_string(),
            ));
        }

        if self.sources.len() > limits.max_stations || self.destinations.len() > limits.max_stations
        {
            return Err(PlanError::InvalidRequest(format!(
                "at most {} source and {} destination stations are allowed",
                limits.max_stations, limits.max_stations
            )));
        }

        if self.dates.len() > limits.max_dates {
            return Err(PlanError::InvalidRequest(format!(
                "at most {} travel dates are allowed, got {}",
                limits.max_dates,
                self.dates.len()
            )));
        }

        Ok(())
    }

    /// Total number of legs the request fans out to.
    pub fn leg_count(&self) -> usize {
        self.sources.len() * self.destinations.len() * self.dates.len()
    }

    /// All legs, source outermost and date innermost.
    pub fn legs(&self) -> Vec<Leg> {
        let mut legs = Vec::with_capacity(self.leg_count());
        for source in &self.sources {
            for destination in &self.destinations {
                for date in &self.dates {
                    legs.push(Leg {
                        source: source.clone(),
                        destination: destination.clone(),
                        date: *date,
                    });
                }
            }
        }
        legs
    }
}

/// Progress after a leg finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of legs done, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// A leg that failed, kept as a non-fatal warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegWarning {
    pub leg: Leg,
    pub reason: String,
}

impl fmt::Display for LegWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error fetching trains for {}: {}", self.leg, self.reason)
    }
}

/// Result of one leg.
enum LegOutcome {
    Records(Vec<NormalizedRecord>),
    Failed(LegWarning),
}

/// Everything gathered by a planning run.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    /// Records from every successful leg, in leg order.
    pub records: Vec<NormalizedRecord>,

    /// One warning per failed leg, in leg order.
    pub warnings: Vec<LegWarning>,

    /// Legs processed so far.
    pub legs: usize,
}

impl PlanOutcome {
    /// True when the run produced no usable records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Availability query planner.
pub struct QueryPlanner<'a, S: TrainSource> {
    source: &'a S,
    limits: &'a PlannerLimits,
}

impl<'a, S: TrainSource> QueryPlanner<'a, S> {
    /// Create a new planner.
    pub fn new(source: &'a S, limits: &'a PlannerLimits) -> Self {
        Self { source, limits }
    }

    /// Query every leg of `request` in order.
    ///
    /// `on_progress` is called after each leg, whether it succeeded or not.
    pub async fn run(
        &self,
        request: &PlanRequest,
        on_progress: impl FnMut(Progress),
    ) -> Result<PlanOutcome, PlanError> {
        let mut outcome = PlanOutcome::default();
        self.run_into(request, &mut outcome, on_progress).await?;
        Ok(outcome)
    }

    /// Like [`Self::run`], but accumulates into a caller-owned outcome.
    ///
    /// If the future is dropped part way through, `outcome` still holds
    /// everything gathered from the legs that finished.
    pub async fn run_into(
        &self,
        request: &PlanRequest,
        outcome: &mut PlanOutcome,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<(), PlanError> {
        request.validate(self.limits)?;

        let legs = request.legs();
        let total = legs.len();
        info!(
            sources = request.sources.len(),
            destinations = request.destinations.len(),
            dates = request.dates.len(),
            total,
            "starting availability run"
        );

        for (i, leg) in legs.into_iter().enumerate() {
            match self.run_leg(leg).await {
                LegOutcome::Records(records) => outcome.records.extend(records),
                LegOutcome::Failed(warning) => outcome.warnings.push(warning),
            }

            outcome.legs += 1;
            let progress = Progress {
                completed: i + 1,
                total,
            };
            on_progress(progress);
        }

        info!(
            records = outcome.records.len(),
            warnings = outcome.warnings.len(),
            "availability run finished"
        );

        Ok(())
    }

    async fn run_leg(&self, leg: Leg) -> LegOutcome {
        match self.fetch_leg(&leg).await {
            Ok(records) => {
                debug!(%leg, records = records.len(), "leg succeeded");
                LegOutcome::Records(records)
            }
            Err(e) => {
                warn!(%leg, error = %e, "leg failed");
                LegOutcome::Failed(LegWarning {
                    leg,
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn fetch_leg(&self, leg: &Leg) -> Result<Vec<NormalizedRecord>, LegError> {
        let trains = self
            .source
            .fetch_trains(&leg.source, &leg.destination, leg.date)
            .await?;
        Ok(extract_records(&trains)?)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
