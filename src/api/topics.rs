//! Topic API endpoints
//!
//! - GET /api/topics - List all topics

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::Topic;

#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    pub topics: Vec<Topic>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/topics", get(list_topics))
}

async fn list_topics(State(state): State<AppState>) -> Result<Json<TopicListResponse>, ApiError> {
    let topics = state.topic_service.list().await?;
    Ok(Json(TopicListResponse { topics }))
}
