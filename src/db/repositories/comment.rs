//! Comment repository

use super::{mysql_pool, sqlite_pool};
use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Comment;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Timelike, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on an article, newest first
    async fn list_by_article(&self, article_id: i64) -> Result<Vec<Comment>>;

    /// Insert a comment. Fails with a foreign-key violation when the article
    /// or author does not exist.
    async fn create(&self, article_id: i64, author: &str, body: &str) -> Result<Comment>;

    /// Delete a comment, returning whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct SqlxCommentRepository {
    pool: DynDatabasePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn list_by_article(&self, article_id: i64) -> Result<Vec<Comment>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_comments_sqlite(sqlite_pool(&self.pool)?, article_id).await
            }
            DatabaseDriver::Mysql => list_comments_mysql(mysql_pool(&self.pool)?, article_id).await,
        }
    }

    async fn create(&self, article_id: i64, author: &str, body: &str) -> Result<Comment> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_comment_sqlite(sqlite_pool(&self.pool)?, article_id, author, body).await
            }
            DatabaseDriver::Mysql => {
                create_comment_mysql(mysql_pool(&self.pool)?, article_id, author, body).await
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_comment_sqlite(sqlite_pool(&self.pool)?, id).await,
            DatabaseDriver::Mysql => delete_comment_mysql(mysql_pool(&self.pool)?, id).await,
        }
    }
}

const LIST_SQL: &str = r#"
    SELECT comment_id, article_id, body, votes, author, created_at
    FROM comments
    WHERE article_id = ?
    ORDER BY created_at DESC, comment_id DESC
"#;

const INSERT_SQL: &str = r#"
    INSERT INTO comments (body, article_id, author, votes, created_at)
    VALUES (?, ?, ?, 0, ?)
"#;

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_comments_sqlite(pool: &SqlitePool, article_id: i64) -> Result<Vec<Comment>> {
    let rows = sqlx::query(LIST_SQL)
        .bind(article_id)
        .fetch_all(pool)
        .await
        .context("Failed to list comments")?;

    Ok(rows.iter().map(row_to_comment_sqlite).collect())
}

async fn create_comment_sqlite(
    pool: &SqlitePool,
    article_id: i64,
    author: &str,
    body: &str,
) -> Result<Comment> {
    let now = Utc::now();

    let result = sqlx::query(INSERT_SQL)
        .bind(body)
        .bind(article_id)
        .bind(author)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create comment")?;

    Ok(Comment {
        comment_id: result.last_insert_rowid(),
        article_id,
        body: body.to_string(),
        votes: 0,
        author: author.to_string(),
        created_at: now,
    })
}

async fn delete_comment_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete comment")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_comment_sqlite(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        comment_id: row.get("comment_id"),
        article_id: row.get("article_id"),
        body: row.get("body"),
        votes: row.get("votes"),
        author: row.get("author"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_comments_mysql(pool: &MySqlPool, article_id: i64) -> Result<Vec<Comment>> {
    let rows = sqlx::query(LIST_SQL)
        .bind(article_id)
        .fetch_all(pool)
        .await
        .context("Failed to list comments")?;

    Ok(rows.iter().map(row_to_comment_mysql).collect())
}

async fn create_comment_mysql(
    pool: &MySqlPool,
    article_id: i64,
    author: &str,
    body: &str,
) -> Result<Comment> {
    // MySQL TIMESTAMP keeps whole seconds
    let now = Utc::now()
        .with_nanosecond(0)
        .unwrap_or_else(Utc::now);

    let result = sqlx::query(INSERT_SQL)
        .bind(body)
        .bind(article_id)
        .bind(author)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create comment")?;

    Ok(Comment {
        comment_id: result.last_insert_id() as i64,
        article_id,
        body: body.to_string(),
        votes: 0,
        author: author.to_string(),
        created_at: now,
    })
}

async fn delete_comment_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete comment")?;

    Ok(result.rows_affected() > 0)
}

fn row_to_comment_mysql(row: &sqlx::mysql::MySqlRow) -> Comment {
    Comment {
        comment_id: row.get("comment_id"),
        article_id: row.get("article_id"),
        body: row.get("body"),
        votes: row.get("votes"),
        author: row.get("author"),
        created_at: row.get("created_at"),
    }
}
