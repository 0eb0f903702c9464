//! Article repository
//!
//! Database operations for articles. Every read joins comments so the
//! returned rows carry a `comment_count`.

use super::{mysql_pool, sqlite_pool};
use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Article, ArticleQuery, ArticleSummary};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Article repository trait
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// List articles matching the query, ordered as requested
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>>;

    /// Get article by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Article>>;

    /// Add `delta` to the article's votes.
    ///
    /// Returns false when no article has this ID.
    async fn increment_votes(&self, id: i64, delta: i64) -> Result<bool>;
}

/// SQLx-based article repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxArticleRepository {
    pool: DynDatabasePool,
}

impl SqlxArticleRepository {
    /// Create a new SQLx article repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ArticleRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn list(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_articles_sqlite(sqlite_pool(&self.pool)?, query).await,
            DatabaseDriver::Mysql => list_articles_mysql(mysql_pool(&self.pool)?, query).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_article_by_id_sqlite(sqlite_pool(&self.pool)?, id).await,
            DatabaseDriver::Mysql => get_article_by_id_mysql(mysql_pool(&self.pool)?, id).await,
        }
    }

    async fn increment_votes(&self, id: i64, delta: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                increment_votes_sqlite(sqlite_pool(&self.pool)?, id, delta).await
            }
            DatabaseDriver::Mysql => {
                increment_votes_mysql(mysql_pool(&self.pool)?, id, delta).await
            }
        }
    }
}

const SUMMARY_COLUMNS: &str = r#"
    a.article_id, a.title, a.topic, a.author, a.created_at, a.votes, a.article_img_url,
    COUNT(c.comment_id) AS comment_count
"#;

/// Listing SQL for a query. Only whitelisted column names are interpolated.
fn build_list_sql(query: &ArticleQuery) -> String {
    let filter = if query.topic.is_some() {
        "WHERE a.topic = ?"
    } else {
        ""
    };

    format!(
        r#"
        SELECT {}
        FROM articles a
        LEFT JOIN comments c ON c.article_id = a.article_id
        {}
        GROUP BY a.article_id
        ORDER BY {}
        "#,
        SUMMARY_COLUMNS,
        filter,
        query.order_clause()
    )
}

const GET_BY_ID_SQL: &str = r#"
    SELECT a.article_id, a.title, a.topic, a.author, a.body, a.created_at, a.votes,
           a.article_img_url, COUNT(c.comment_id) AS comment_count
    FROM articles a
    LEFT JOIN comments c ON c.article_id = a.article_id
    WHERE a.article_id = ?
    GROUP BY a.article_id
"#;

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_articles_sqlite(
    pool: &SqlitePool,
    query: &ArticleQuery,
) -> Result<Vec<ArticleSummary>> {
    let sql = build_list_sql(query);
    let mut q = sqlx::query::<sqlx::Sqlite>(&sql);
    if let Some(topic) = &query.topic {
        q = q.bind(topic);
    }

    let rows = q.fetch_all(pool).await.context("Failed to list articles")?;

    rows.iter().map(row_to_summary_sqlite).collect()
}

async fn get_article_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Article>> {
    let row = sqlx::query(GET_BY_ID_SQL)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get article by ID")?;

    row.as_ref().map(row_to_article_sqlite).transpose()
}

async fn increment_votes_sqlite(pool: &SqlitePool, id: i64, delta: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE articles SET votes = votes + ? WHERE article_id = ?")
        .bind(delta)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update article votes")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_summary_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<ArticleSummary> {
    Ok(ArticleSummary {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes").context("Invalid article votes")?,
        article_img_url: row.try_get("article_img_url")?,
        comment_count: row.try_get("comment_count")?,
    })
}

fn row_to_article_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Article> {
    Ok(Article {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes").context("Invalid article votes")?,
        article_img_url: row.try_get("article_img_url")?,
        comment_count: row.try_get("comment_count")?,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_articles_mysql(
    pool: &MySqlPool,
    query: &ArticleQuery,
) -> Result<Vec<ArticleSummary>> {
    let sql = build_list_sql(query);
    let mut q = sqlx::query::<sqlx::MySql>(&sql);
    if let Some(topic) = &query.topic {
        q = q.bind(topic);
    }

    let rows = q.fetch_all(pool).await.context("Failed to list articles")?;

    rows.iter().map(row_to_summary_mysql).collect()
}

async fn get_article_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Article>> {
    let row = sqlx::query(GET_BY_ID_SQL)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get article by ID")?;

    row.as_ref().map(row_to_article_mysql).transpose()
}

async fn increment_votes_mysql(pool: &MySqlPool, id: i64, delta: i64) -> Result<bool> {
    let result = sqlx::query("UPDATE articles SET votes = votes + ? WHERE article_id = ?")
        .bind(delta)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update article votes")?;

    if result.rows_affected() > 0 {
        return Ok(true);
    }

    // MySQL reports zero affected rows when the value did not change
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE article_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to check article")?;

    Ok(count > 0)
}

fn row_to_summary_mysql(row: &sqlx::mysql::MySqlRow) -> Result<ArticleSummary> {
    Ok(ArticleSummary {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes").context("Invalid article votes")?,
        article_img_url: row.try_get("article_img_url")?,
        comment_count: row.try_get("comment_count")?,
    })
}

fn row_to_article_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Article> {
    Ok(Article {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes").context("Invalid article votes")?,
        article_img_url: row.try_get("article_img_url")?,
        comment_count: row.try_get("comment_count")?,
    })
}
