//! Service-level endpoints
//!
//! - GET /api - Describe every endpoint
//! - GET /api/healthcheck - Database reachability

use axum::{extract::State, routing::get, Json, Router};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};

const ENDPOINTS_JSON: &str = include_str!("endpoints.json");

static ENDPOINTS: Lazy<Result<serde_json::Value, String>> =
    Lazy::new(|| serde_json::from_str(ENDPOINTS_JSON).map_err(|e| e.to_string()));

/// Response for GET /api
#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    pub endpoints: serde_json::Value,
}

/// Response for GET /api/healthcheck
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(list_endpoints))
        .route("/api/healthcheck", get(healthcheck))
}

async fn list_endpoints() -> Result<Json<EndpointsResponse>, ApiError> {
    let endpoints = ENDPOINTS
        .as_ref()
        .map_err(|e| ApiError::internal_error(format!("Invalid endpoints.json: {}", e)))?;

    Ok(Json(EndpointsResponse {
        endpoints: endpoints.clone(),
    }))
}

async fn healthcheck(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state.pool.ping().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_json_is_valid() {
        let endpoints = ENDPOINTS.as_ref().expect("endpoints.json should parse");

        for key in [
            "GET /api",
            "GET /api/topics",
            "GET /api/articles",
            "GET /api/articles/:article_id",
            "GET /api/articles/:article_id/comments",
            "POST /api/articles/:article_id/comments",
            "PATCH /api/articles/:article_id",
            "DELETE /api/comments/:comment_id",
            "GET /api/users",
        ] {
            assert!(endpoints.get(key).is_some(), "missing {}", key);
        }
    }
}
