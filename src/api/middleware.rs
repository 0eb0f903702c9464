//! Shared state and error translation for the HTTP layer
//!
//! Every handler returns `Result<_, ApiError>`. The error's variant decides
//! the status code; clients only ever see a short fixed `msg`, while the
//! detail is logged.

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repositories::{
    SqlxArticleRepository, SqlxCommentRepository, SqlxTopicRepository, SqlxUserRepository,
};
use crate::db::DynDatabasePool;
use crate::services::{
    ArticleService, ArticleServiceError, CommentService, CommentServiceError, TopicService,
    UserService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub topic_service: Arc<TopicService>,
    pub user_service: Arc<UserService>,
    pub article_service: Arc<ArticleService>,
    pub comment_service: Arc<CommentService>,
}

impl AppState {
    /// Wire repositories and services over a connection pool
    pub fn new(pool: DynDatabasePool) -> Self {
        let topic_repo = SqlxTopicRepository::boxed(pool.clone());
        let user_repo = SqlxUserRepository::boxed(pool.clone());
        let article_repo = SqlxArticleRepository::boxed(pool.clone());
        let comment_repo = SqlxCommentRepository::boxed(pool.clone());

        Self {
            topic_service: Arc::new(TopicService::new(topic_repo.clone())),
            user_service: Arc::new(UserService::new(user_repo)),
            article_service: Arc::new(ArticleService::new(article_repo.clone(), topic_repo)),
            comment_service: Arc::new(CommentService::new(comment_repo, article_repo)),
            pool,
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub msg: String,
}

impl ErrorBody {
    fn new(msg: &str) -> Json<Self> {
        Json(Self {
            msg: msg.to_string(),
        })
    }
}

/// Error returned by handlers and extractors
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input: bad id, invalid body, missing fields, bad sort options
    BadRequest(String),
    /// A referenced entity does not exist
    NotFound(String),
    /// Anything else
    Internal(String),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = match &self {
            Self::BadRequest(detail) => {
                tracing::debug!("Bad request: {}", detail);
                "bad request"
            }
            Self::NotFound(detail) => {
                tracing::debug!("Not found: {}", detail);
                "not found"
            }
            Self::Internal(detail) => {
                tracing::error!("Internal server error: {}", detail);
                "Internal server error"
            }
        };

        (self.status(), ErrorBody::new(msg)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{:#}", err))
    }
}

impl From<ArticleServiceError> for ApiError {
    fn from(err: ArticleServiceError) -> Self {
        match err {
            ArticleServiceError::NotFound(msg) => Self::NotFound(msg),
            ArticleServiceError::ValidationError(msg) => Self::BadRequest(msg),
            ArticleServiceError::InternalError(e) => e.into(),
        }
    }
}

impl From<CommentServiceError> for ApiError {
    fn from(err: CommentServiceError) -> Self {
        match err {
            CommentServiceError::NotFound(msg) => Self::NotFound(msg),
            CommentServiceError::ValidationError(msg) => Self::BadRequest(msg),
            CommentServiceError::InternalError(e) => e.into(),
        }
    }
}

/// Fallback for requests no route matches
pub async fn path_not_found() -> Response {
    (StatusCode::NOT_FOUND, ErrorBody::new("path not found")).into_response()
}

/// Turn a handler panic into the standard 500 response
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::internal_error(format!("handler panicked: {}", detail)).into_response()
}
