//! User API endpoints
//!
//! - GET /api/users - List all users

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::User;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/users", get(list_users))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.user_service.list().await?;
    Ok(Json(UserListResponse { users }))
}
