//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the queries for a single entity and dispatches
//! to a SQLite or MySQL implementation based on the pool's driver.

pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

pub use article::{ArticleRepository, SqlxArticleRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
pub use topic::{SqlxTopicRepository, TopicRepository};
pub use user::{SqlxUserRepository, UserRepository};

use anyhow::{Context, Result};
use sqlx::{MySqlPool, SqlitePool};

use crate::db::DynDatabasePool;

fn sqlite_pool(pool: &DynDatabasePool) -> Result<&SqlitePool> {
    pool.as_sqlite().context("Database pool is not SQLite")
}

fn mysql_pool(pool: &DynDatabasePool) -> Result<&MySqlPool> {
    pool.as_mysql().context("Database pool is not MySQL")
}
