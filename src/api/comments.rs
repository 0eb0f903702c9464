//! Comment API endpoints
//!
//! - GET /api/articles/{id}/comments - Comments on an article, newest first
//! - POST /api/articles/{id}/comments - Post a comment
//! - DELETE /api/comments/{id} - Delete a comment

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::api::extractors::{ValidId, ValidJson};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{Comment, CreateCommentInput};

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/articles/{id}/comments",
            get(list_comments).post(create_comment),
        )
        .route("/api/comments/{id}", delete(delete_comment))
}

async fn list_comments(
    State(state): State<AppState>,
    ValidId(article_id): ValidId,
) -> Result<Json<CommentListResponse>, ApiError> {
    let comments = state.comment_service.list_by_article(article_id).await?;
    Ok(Json(CommentListResponse { comments }))
}

async fn create_comment(
    State(state): State<AppState>,
    ValidId(article_id): ValidId,
    ValidJson(input): ValidJson<CreateCommentInput>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let comment = state.comment_service.create(article_id, input).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

async fn delete_comment(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.comment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
