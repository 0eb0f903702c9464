//! Article service
//!
//! Listing with topic filtering and sorting, single-article lookup, and
//! vote updates.

use crate::db::repositories::{ArticleRepository, TopicRepository};
use crate::models::{Article, ArticleQuery, ArticleSummary};
use anyhow::Context;
use std::sync::Arc;

/// Error types for article service operations
#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    /// Article or topic not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Article service
pub struct ArticleService {
    repo: Arc<dyn ArticleRepository>,
    topics: Arc<dyn TopicRepository>,
}

impl ArticleService {
    /// Create a new article service
    ///
    /// # Arguments
    /// * `repo` - Article repository
    /// * `topics` - Topic repository, used to explain empty topic listings
    pub fn new(repo: Arc<dyn ArticleRepository>, topics: Arc<dyn TopicRepository>) -> Self {
        Self { repo, topics }
    }

    /// List articles matching `query`.
    ///
    /// # Errors
    /// - `NotFound` if a topic filter matches no articles, whether or not
    ///   the topic itself exists
    pub async fn list(
        &self,
        query: &ArticleQuery,
    ) -> Result<Vec<ArticleSummary>, ArticleServiceError> {
        let articles = self
            .repo
            .list(query)
            .await
            .context("Failed to list articles")?;

        if let Some(topic) = &query.topic {
            if articles.is_empty() {
                let exists = self
                    .topics
                    .exists(topic)
                    .await
                    .context("Failed to check topic")?;

                let reason = if exists {
                    format!("No articles for topic: {}", topic)
                } else {
                    format!("Topic not found: {}", topic)
                };
                return Err(ArticleServiceError::NotFound(reason));
            }
        }

        Ok(articles)
    }

    /// Get an article by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Article, ArticleServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get article")?
            .ok_or_else(|| ArticleServiceError::NotFound(format!("Article not found: {}", id)))
    }

    /// Apply a vote delta and return the updated article.
    ///
    /// # Errors
    /// - `ValidationError` if `inc_votes` is absent or would push the
    ///   total outside the `i64` range
    /// - `NotFound` if no article has this ID
    pub async fn update_votes(
        &self,
        id: i64,
        inc_votes: Option<i64>,
    ) -> Result<Article, ArticleServiceError> {
        let delta = inc_votes.ok_or_else(|| {
            ArticleServiceError::ValidationError("inc_votes is required".to_string())
        })?;

        let current = self.get_by_id(id).await?;
        if current.votes.checked_add(delta).is_none() {
            return Err(ArticleServiceError::ValidationError(format!(
                "inc_votes {} overflows votes for article {}",
                delta, id
            )));
        }

        let updated = self
            .repo
            .increment_votes(id, delta)
            .await
            .context("Failed to update votes")?;

        if !updated {
            return Err(ArticleServiceError::NotFound(format!(
                "Article not found: {}",
                id
            )));
        }

        self.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_seeded_test_pool;
    use crate::db::repositories::{SqlxArticleRepository, SqlxTopicRepository};
    use crate::models::{ArticleSortField, SortOrder};

    async fn setup_test_service() -> ArticleService {
        let pool = create_seeded_test_pool().await;
        ArticleService::new(
            SqlxArticleRepository::boxed(pool.clone()),
            SqlxTopicRepository::boxed(pool),
        )
    }

    #[tokio::test]
    async fn test_list_all_articles() {
        let service = setup_test_service().await;

        let articles = service.list(&ArticleQuery::default()).await.unwrap();

        assert_eq!(articles.len(), 13);
    }

    #[tokio::test]
    async fn test_list_by_topic() {
        let service = setup_test_service().await;

        let articles = service
            .list(&ArticleQuery::default().with_topic("mitch"))
            .await
            .unwrap();

        assert_eq!(articles.len(), 12);
        assert!(articles.iter().all(|a| a.topic == "mitch"));
    }

    #[tokio::test]
    async fn test_list_unknown_topic_is_not_found() {
        let service = setup_test_service().await;

        let result = service
            .list(&ArticleQuery::default().with_topic("dogs"))
            .await;

        assert!(matches!(result, Err(ArticleServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_topic_without_articles_is_not_found() {
        let service = setup_test_service().await;

        let result = service
            .list(&ArticleQuery::default().with_topic("paper"))
            .await;

        match result {
            Err(ArticleServiceError::NotFound(msg)) => assert!(msg.contains("No articles")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let service = setup_test_service().await;
        let query = ArticleQuery {
            topic: None,
            sort_by: ArticleSortField::ArticleId,
            order: SortOrder::Asc,
        };

        let articles = service.list(&query).await.unwrap();

        let ids: Vec<i64> = articles.iter().map(|a| a.article_id).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let service = setup_test_service().await;

        let article = service.get_by_id(3).await.unwrap();

        assert_eq!(article.title, "Eight pug gifs that remind me of mitch");
        assert_eq!(article.comment_count, 2);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let service = setup_test_service().await;

        let result = service.get_by_id(1000).await;

        assert!(matches!(result, Err(ArticleServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_votes() {
        let service = setup_test_service().await;

        let article = service.update_votes(1, Some(10)).await.unwrap();
        assert_eq!(article.votes, 110);
        assert_eq!(article.comment_count, 11);

        let article = service.update_votes(1, Some(-200)).await.unwrap();
        assert_eq!(article.votes, -90);
    }

    #[tokio::test]
    async fn test_update_votes_requires_inc_votes() {
        let service = setup_test_service().await;

        let result = service.update_votes(1, None).await;

        assert!(matches!(result, Err(ArticleServiceError::ValidationError(_))));
        assert_eq!(service.get_by_id(1).await.unwrap().votes, 100);
    }

    #[tokio::test]
    async fn test_update_votes_rejects_overflow() {
        let service = setup_test_service().await;

        let result = service.update_votes(1, Some(i64::MAX)).await;
        assert!(matches!(result, Err(ArticleServiceError::ValidationError(_))));

        let result = service.update_votes(1, Some(i64::MIN)).await;
        assert!(result.is_ok());
        let result = service.update_votes(1, Some(-1_000)).await;
        assert!(matches!(result, Err(ArticleServiceError::ValidationError(_))));

        assert_eq!(service.list(&ArticleQuery::default()).await.unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_update_votes_missing_article() {
        let service = setup_test_service().await;

        let result = service.update_votes(1000, Some(1)).await;

        assert!(matches!(result, Err(ArticleServiceError::NotFound(_))));
    }
}
