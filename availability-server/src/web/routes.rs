//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, trace, warn};

use crate::export::{ExportError, export_file_name, export_records};
use crate::planner::{PlanError, PlanOutcome, PlanRequest, QueryPlanner, rank_records};
use crate::stations::StationLookupError;

use super::dto::*;
use super::state::AppState;

/// Header carrying the number of failed legs on an export.
pub const LEG_WARNINGS_HEADER: &str = "x-leg-warnings";

const NO_TRAINS_MESSAGE: &str = "No trains found for the selected inputs.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/api/availability", post(check_availability))
        .route("/api/availability/export", post(export_availability))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Suggest stations for free text.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let query = req.q.trim();
    if query.is_empty() {
        return Ok(Json(StationSearchResponse {
            stations: Vec::new(),
        }));
    }

    let suggestions = state.stations.suggest(query).await?;

    Ok(Json(StationSearchResponse {
        stations: suggestions.into_iter().map(Into::into).collect(),
    }))
}

/// Run every leg of the request and rank what came back.
async fn gather(
    state: &AppState,
    req: &AvailabilityRequest,
) -> Result<(PlanRequest, PlanOutcome), AppError> {
    let plan = req
        .to_plan_request()
        .map_err(|message| AppError::BadRequest { message })?;

    let planner = QueryPlanner::new(state.trains.as_ref(), &state.config.limits);
    let mut outcome = planner
        .run(&plan, |progress| trace!(%progress, "availability progress"))
        .await?;

    let records = std::mem::take(&mut outcome.records);
    outcome.records = rank_records(records, &state.config.rank_policy);

    Ok((plan, outcome))
}

/// Check availability and return ranked records as JSON.
async fn check_availability(
    State(state): State<AppState>,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let (_, outcome) = gather(&state, &req).await?;

    let no_results = outcome.is_empty();
    let warnings = outcome.warnings.iter().map(ToString::to_string).collect();

    Ok(Json(AvailabilityResponse {
        records: outcome.records,
        warnings,
        legs: outcome.legs,
        no_results,
    }))
}

/// Check availability and return ranked records as a download.
async fn export_availability(
    State(state): State<AppState>,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Response, AppError> {
    let (plan, outcome) = gather(&state, &req).await?;

    if outcome.is_empty() {
        return Err(AppError::NotFound {
            message: NO_TRAINS_MESSAGE.to_string(),
        });
    }

    let body = export_records(&outcome.records, req.format)?;
    let file_name = export_file_name(&plan.sources, &plan.destinations, req.format);

    info!(
        %file_name,
        records = outcome.records.len(),
        warnings = outcome.warnings.len(),
        "exported availability"
    );

    let headers = [
        (header::CONTENT_TYPE, req.format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
        (
            HeaderName::from_static(LEG_WARNINGS_HEADER),
            outcome.warnings.len().to_string(),
        ),
    ];

    Ok((headers, body).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(message) => AppError::BadRequest { message },
        }
    }
}

impl From<StationLookupError> for AppError {
    fn from(e: StationLookupError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
