//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{DomainError, validate_candidates};
use crate::enrich::Superseded;
use crate::pipeline::{RankedPlaces, SearchResponse};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/places", get(search_places))
        .route("/api/rank", post(rank_candidates))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find, enrich and rank nearby places.
async fn search_places(
    State(state): State<AppState>,
    query: Result<Query<PlacesQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;
    let request = query.to_request()?;

    let token = state.sessions.begin(query.session.as_deref()).await;
    let response = state.pipeline.run(&request, &token).await?;

    Ok(Json(response))
}

/// Rank caller-supplied candidates.
async fn rank_candidates(
    State(state): State<AppState>,
    body: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankedPlaces>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;
    validate_candidates(&req.candidates)?;

    // Callers may lower the budget but never raise it past the configured cap.
    let cap = state.pipeline.config().enrichment_budget;
    let budget = req.enrichment_budget.map_or(cap, |requested| requested.min(cap));
    let token = state.sessions.begin(req.session.as_deref()).await;

    let ranked = state
        .pipeline
        .rank_with_token(req.origin, req.candidates, &req.preferences, budget, &token)
        .await?;

    Ok(Json(ranked))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// A newer request from the same session took over.
    Superseded { epoch: u64 },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<Superseded> for AppError {
    fn from(e: Superseded) -> Self {
        AppError::Superseded { epoch: e.epoch }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::BadRequest { message } => {
                warn!(error = %message, "Rejected request");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Superseded { epoch } => {
                debug!(epoch, "Request superseded");
                StatusCode::NO_CONTENT.into_response()
            }
        }
    }
}
