//! User service

use crate::db::repositories::UserRepository;
use crate::models::User;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Read access to users
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// All users, ordered by username
    pub async fn list(&self) -> Result<Vec<User>> {
        self.repo.list().await.context("Failed to list users")
    }
}
