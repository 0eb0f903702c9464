//! Database layer
//!
//! Supports SQLite (default, zero setup) and MySQL. The driver is selected
//! from configuration; repositories work against [`DynDatabasePool`] and
//! dispatch to backend-specific queries.
//!
//! # Usage
//!
//! ```ignore
//! use newsroom::config::DatabaseConfig;
//! use newsroom::db::{create_pool, migrations, seed};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! seed::seed(&pool, &seed::SeedData::sample()?).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod seed;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};

/// Whether an error chain bottoms out in a foreign-key violation.
///
/// Inserting a row that references a missing user or article surfaces this
/// way on both SQLite and MySQL.
pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<sqlx::Error>())
        .filter_map(|e| e.as_database_error())
        .any(|db_err| db_err.kind() == sqlx::error::ErrorKind::ForeignKeyViolation)
}

/// In-memory pool with migrations applied and the bundled dataset loaded
#[cfg(test)]
pub(crate) async fn create_seeded_test_pool() -> DynDatabasePool {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    let data = seed::SeedData::sample().expect("Failed to load sample data");
    seed::seed(&pool, &data).await.expect("Failed to seed");
    pool
}
