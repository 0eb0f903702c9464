//! Comment service
//!
//! Listing, posting and deleting comments on articles.

use crate::db::is_foreign_key_violation;
use crate::db::repositories::{ArticleRepository, CommentRepository};
use crate::models::{Comment, CreateCommentInput};
use anyhow::Context;
use std::sync::Arc;

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Comment, article or user not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
    articles: Arc<dyn ArticleRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>, articles: Arc<dyn ArticleRepository>) -> Self {
        Self { repo, articles }
    }

    /// Comments on an article, newest first.
    ///
    /// An existing article without comments yields an empty list.
    pub async fn list_by_article(
        &self,
        article_id: i64,
    ) -> Result<Vec<Comment>, CommentServiceError> {
        let article = self
            .articles
            .get_by_id(article_id)
            .await
            .context("Failed to get article")?;

        if article.is_none() {
            return Err(CommentServiceError::NotFound(format!(
                "Article not found: {}",
                article_id
            )));
        }

        let comments = self
            .repo
            .list_by_article(article_id)
            .await
            .context("Failed to list comments")?;

        Ok(comments)
    }

    /// Post a comment on an article.
    ///
    /// # Errors
    /// - `ValidationError` if `username` or `body` is missing or blank
    /// - `NotFound` if the article or user does not exist
    pub async fn create(
        &self,
        article_id: i64,
        input: CreateCommentInput,
    ) -> Result<Comment, CommentServiceError> {
        let username = required(input.username, "username")?;
        let body = required(input.body, "body")?;

        match self.repo.create(article_id, &username, &body).await {
            Ok(comment) => {
                tracing::debug!(
                    "Comment {} posted on article {}",
                    comment.comment_id,
                    article_id
                );
                Ok(comment)
            }
            Err(e) if is_foreign_key_violation(&e) => Err(CommentServiceError::NotFound(format!(
                "Article {} or user {} not found",
                article_id, username
            ))),
            Err(e) => Err(e.context("Failed to create comment").into()),
        }
    }

    /// Delete a comment by ID
    pub async fn delete(&self, id: i64) -> Result<(), CommentServiceError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete comment")?;

        if !deleted {
            return Err(CommentServiceError::NotFound(format!(
                "Comment not found: {}",
                id
            )));
        }

        Ok(())
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, CommentServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CommentServiceError::ValidationError(format!(
            "{} is required",
            field
        ))),
    }
}
