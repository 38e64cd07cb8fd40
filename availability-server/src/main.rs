use availability_server::availability::{AvailabilityClient, MockAvailabilityClient};
use availability_server::config::ServerConfig;
use availability_server::planner::PlannerConfig;
use availability_server::stations::StationClient;
use availability_server::web::{AppState, TrainBackend, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "availability_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // Saved responses replace the live service when a data directory is given
    let trains = match &config.mock_data_dir {
        Some(dir) => {
            let mock = MockAvailabilityClient::new(dir).expect("Failed to load mock data");
            warn!(dir = %dir.display(), responses = mock.len(), "serving saved availability responses");
            TrainBackend::Mock(mock)
        }
        None => TrainBackend::Live(
            AvailabilityClient::new(config.availability.clone())
                .expect("Failed to create availability client"),
        ),
    };

    let stations =
        StationClient::new(config.stations.clone()).expect("Failed to create station client");

    let state = AppState::new(trains, stations, PlannerConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "seat availability server listening");
    info!("  GET  /health                   - Health check");
    info!("  GET  /api/stations/search      - Station autosuggest");
    info!("  POST /api/availability         - Ranked availability as JSON");
    info!("  POST /api/availability/export  - Ranked availability as xlsx or CSV");

    axum::serve(listener, app).await.expect("Server error");
}
