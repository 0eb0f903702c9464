//! Sample data loading
//!
//! Replaces every row in the domain tables with a dataset. The bundled
//! dataset is compiled into the binary so `seed` needs no data files.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{MySqlPool, SqlitePool};

use super::DynDatabasePool;
use crate::config::DatabaseDriver;
use crate::models::{Comment, Topic, User};

const SAMPLE_DATA: &str = include_str!("data/sample.json");

/// Article row as stored, with an explicit id and no derived fields
#[derive(Debug, Clone, Deserialize)]
pub struct SeedArticle {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: i64,
    pub article_img_url: Option<String>,
}

/// A complete dataset for the domain tables
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<SeedArticle>,
    pub comments: Vec<Comment>,
}

impl SeedData {
    /// The dataset bundled with the application
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_DATA)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse seed data")
    }
}

/// Row counts inserted by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub topics: usize,
    pub users: usize,
    pub articles: usize,
    pub comments: usize,
}

/// Delete all domain rows and insert `data` in a single transaction.
///
/// Tables must already exist; run migrations first.
pub async fn seed(pool: &DynDatabasePool, data: &SeedData) -> Result<SeedSummary> {
    match pool.driver() {
        DatabaseDriver::Sqlite => {
            let sqlite = pool.as_sqlite().context("Pool is not a SQLite pool")?;
            seed_sqlite(sqlite, data).await?
        }
        DatabaseDriver::Mysql => {
            let mysql = pool.as_mysql().context("Pool is not a MySQL pool")?;
            seed_mysql(mysql, data).await?
        }
    }

    let summary = SeedSummary {
        topics: data.topics.len(),
        users: data.users.len(),
        articles: data.articles.len(),
        comments: data.comments.len(),
    };

    tracing::info!(
        "Seeded {} topics, {} users, {} articles, {} comments",
        summary.topics,
        summary.users,
        summary.articles,
        summary.comments
    );

    Ok(summary)
}

const CLEAR_TABLES: [&str; 4] = [
    "DELETE FROM comments",
    "DELETE FROM articles",
    "DELETE FROM users",
    "DELETE FROM topics",
];

// ============================================================================
// SQLite implementation
// ============================================================================

async fn seed_sqlite(pool: &SqlitePool, data: &SeedData) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to begin seed transaction")?;

    for statement in CLEAR_TABLES {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to execute: {}", statement))?;
    }

    for topic in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES (?, ?)")
            .bind(&topic.slug)
            .bind(&topic.description)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert topic: {}", topic.slug))?;
    }

    for user in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert user: {}", user.username))?;
    }

    for article in &data.articles {
        sqlx::query(
            r#"
            INSERT INTO articles (article_id, title, topic, author, body, created_at, votes, article_img_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.article_id)
        .bind(&article.title)
        .bind(&article.topic)
        .bind(&article.author)
        .bind(&article.body)
        .bind(article.created_at)
        .bind(article.votes)
        .bind(&article.article_img_url)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert article {}", article.article_id))?;
    }

    for comment in &data.comments {
        sqlx::query(
            r#"
            INSERT INTO comments (comment_id, body, article_id, author, votes, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.comment_id)
        .bind(&comment.body)
        .bind(comment.article_id)
        .bind(&comment.author)
        .bind(comment.votes)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert comment {}", comment.comment_id))?;
    }

    tx.commit().await.context("Failed to commit seed transaction")?;
    Ok(())
}

// ============================================================================
// MySQL implementation
// ============================================================================

async fn seed_mysql(pool: &MySqlPool, data: &SeedData) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to begin seed transaction")?;

    for statement in CLEAR_TABLES {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to execute: {}", statement))?;
    }

    for topic in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES (?, ?)")
            .bind(&topic.slug)
            .bind(&topic.description)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert topic: {}", topic.slug))?;
    }

    for user in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert user: {}", user.username))?;
    }

    for article in &data.articles {
        sqlx::query(
            r#"
            INSERT INTO articles (article_id, title, topic, author, body, created_at, votes, article_img_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.article_id)
        .bind(&article.title)
        .bind(&article.topic)
        .bind(&article.author)
        .bind(&article.body)
        .bind(article.created_at)
        .bind(article.votes)
        .bind(&article.article_img_url)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert article {}", article.article_id))?;
    }

    for comment in &data.comments {
        sqlx::query(
            r#"
            INSERT INTO comments (comment_id, body, article_id, author, votes, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.comment_id)
        .bind(&comment.body)
        .bind(comment.article_id)
        .bind(&comment.author)
        .bind(comment.votes)
        .bind(comment.created_at)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert comment {}", comment.comment_id))?;
    }

    tx.commit().await.context("Failed to commit seed transaction")?;
    Ok(())
}
