//! Article API endpoints
//!
//! - GET /api/articles - List articles (`topic`, `sort_by`, `order` queries)
//! - GET /api/articles/{id} - Get one article
//! - PATCH /api/articles/{id} - Change an article's votes

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::extractors::{ValidId, ValidJson};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{Article, ArticleQuery, ArticleSummary};

/// Query parameters for listing articles
#[derive(Debug, Default, Deserialize)]
pub struct ListArticlesQuery {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Request body for PATCH /api/articles/{id}
#[derive(Debug, Deserialize)]
pub struct UpdateVotesInput {
    pub inc_votes: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleSummary>,
}

/// Single-article response. GET wraps the article in a one-element array.
#[derive(Debug, Serialize)]
pub struct ArticleResponse<T> {
    pub article: T,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/articles/{id}", get(get_article).patch(update_votes))
}

async fn list_articles(
    State(state): State<AppState>,
    query: Result<Query<ListArticlesQuery>, QueryRejection>,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let query = ArticleQuery::from_params(
        params.topic,
        params.sort_by.as_deref(),
        params.order.as_deref(),
    )
    .map_err(ApiError::bad_request)?;

    let articles = state.article_service.list(&query).await?;
    Ok(Json(ArticleListResponse { articles }))
}

async fn get_article(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<ArticleResponse<Vec<Article>>>, ApiError> {
    let article = state.article_service.get_by_id(id).await?;
    Ok(Json(ArticleResponse {
        article: vec![article],
    }))
}

async fn update_votes(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<UpdateVotesInput>,
) -> Result<(StatusCode, Json<ArticleResponse<Article>>), ApiError> {
    let article = state
        .article_service
        .update_votes(id, input.inc_votes)
        .await?;

    tracing::debug!("Article {} votes now {}", id, article.votes);
    Ok((StatusCode::CREATED, Json(ArticleResponse { article })))
}
