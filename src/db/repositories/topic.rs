//! Topic repository
//!
//! Database operations for topics.

use super::{mysql_pool, sqlite_pool};
use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Topic;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Topic repository trait
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// List all topics
    async fn list(&self) -> Result<Vec<Topic>>;

    /// Check whether a topic with this slug exists
    async fn exists(&self, slug: &str) -> Result<bool>;
}

/// SQLx-based topic repository implementation
pub struct SqlxTopicRepository {
    pool: DynDatabasePool,
}

impl SqlxTopicRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TopicRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TopicRepository for SqlxTopicRepository {
    async fn list(&self) -> Result<Vec<Topic>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_topics_sqlite(sqlite_pool(&self.pool)?).await,
            DatabaseDriver::Mysql => list_topics_mysql(mysql_pool(&self.pool)?).await,
        }
    }

    async fn exists(&self, slug: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => topic_exists_sqlite(sqlite_pool(&self.pool)?, slug).await,
            DatabaseDriver::Mysql => topic_exists_mysql(mysql_pool(&self.pool)?, slug).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_topics_sqlite(pool: &SqlitePool) -> Result<Vec<Topic>> {
    let rows = sqlx::query("SELECT slug, description FROM topics ORDER BY slug")
        .fetch_all(pool)
        .await
        .context("Failed to list topics")?;

    Ok(rows
        .iter()
        .map(|row| Topic {
            slug: row.get("slug"),
            description: row.get("description"),
        })
        .collect())
}

async fn topic_exists_sqlite(pool: &SqlitePool, slug: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await
        .context("Failed to check topic")?;

    Ok(count > 0)
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_topics_mysql(pool: &MySqlPool) -> Result<Vec<Topic>> {
    let rows = sqlx::query("SELECT slug, description FROM topics ORDER BY slug")
        .fetch_all(pool)
        .await
        .context("Failed to list topics")?;

    Ok(rows
        .iter()
        .map(|row| Topic {
            slug: row.get("slug"),
            description: row.get("description"),
        })
        .collect())
}

async fn topic_exists_mysql(pool: &MySqlPool, slug: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await
        .context("Failed to check topic")?;

    Ok(count > 0)
}
