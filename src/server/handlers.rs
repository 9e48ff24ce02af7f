//! REST API endpoint handlers

use crate::api::Suggestion;
use crate::error::ErrorResponse;
use crate::services::CompanyService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Query string of `/api/companies`
#[derive(Debug, Default, Deserialize)]
pub struct CompanySearchParams {
    #[serde(default)]
    pub query: String,
}

/// Health check endpoint - GET /health or GET /
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Market Info API is running",
        "companies": state.company_count(),
    }))
}

/// Company search - GET /api/companies?query=<text>
pub async fn search_companies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompanySearchParams>,
) -> Json<Vec<Suggestion>> {
    Json(CompanyService::search_companies(&state, &params.query, None))
}

/// Re-read the company directory - POST /api/companies/reload
pub async fn reload_companies(State(state): State<Arc<AppState>>) -> Response {
    match state.reload() {
        Ok(count) => Json(json!({
            "status": "success",
            "companies": count,
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to reload companies: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::from(e))).into_response()
        }
    }
}
