//! Application state for the web layer.

use std::sync::Arc;

use crate::availability::{
    AvailabilityClient, AvailabilityError, MockAvailabilityClient, RawTrainEntry,
};
use crate::domain::{JourneyDate, StationCode};
use crate::planner::{PlannerConfig, TrainSource};
use crate::stations::StationClient;

/// Where train data comes from: the live service or saved responses.
#[derive(Debug, Clone)]
pub enum TrainBackend {
    Live(AvailabilityClient),
    Mock(MockAvailabilityClient),
}

impl TrainSource for TrainBackend {
    async fn fetch_trains(
        &self,
        source: &StationCode,
        destination: &StationCode,
        date: JourneyDate,
    ) -> Result<Vec<RawTrainEntry>, AvailabilityError> {
        match self {
            TrainBackend::Live(client) => client.fetch_trains(source, destination, date).await,
            TrainBackend::Mock(client) => client.fetch_trains(source, destination, date).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Train availability source
    pub trains: Arc<TrainBackend>,

    /// Station autosuggest client
    pub stations: Arc<StationClient>,

    /// Planner limits and ranking policy
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(trains: TrainBackend, stations: StationClient, config: PlannerConfig) -> Self {
        Self {
            trains: Arc::new(trains),
            stations: Arc::new(stations),
            config: Arc::new(config),
        }
    }
}
