//! Reset the configured database to the bundled sample dataset
//!
//! Runs pending migrations first, then replaces every topic, user,
//! article and comment.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsroom::{
    config::Config,
    db::{self, seed},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsroom=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load_with_env(Path::new("config.yml"))?;
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Seeding {:?} database", config.database.driver);

    db::migrations::run_migrations(&pool).await?;

    let data = seed::SeedData::sample()?;
    seed::seed(&pool, &data).await?;

    pool.close().await;
    Ok(())
}
