//! Topic service

use crate::db::repositories::TopicRepository;
use crate::models::Topic;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Read access to topics
pub struct TopicService {
    repo: Arc<dyn TopicRepository>,
}

impl TopicService {
    pub fn new(repo: Arc<dyn TopicRepository>) -> Self {
        Self { repo }
    }

    /// All topics, ordered by slug
    pub async fn list(&self) -> Result<Vec<Topic>> {
        self.repo.list().await.context("Failed to list topics")
    }
}
