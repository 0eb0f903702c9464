//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub comment_id: i64,
    pub article_id: i64,
    pub body: String,
    pub votes: i64,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Input for posting a comment on an article.
///
/// Both fields are optional at the type level so a request missing one is
/// reported as a validation failure rather than a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentInput {
    /// Username of the commenter; must already exist
    pub username: Option<String>,
    /// Comment text
    pub body: Option<String>,
}

impl CreateCommentInput {
    pub fn new(username: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            body: Some(body.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_input_missing_fields() {
        let input: CreateCommentInput = serde_json::from_str(r#"{"username": "lurker"}"#).unwrap();

        assert_eq!(input.username.as_deref(), Some("lurker"));
        assert!(input.body.is_none());
    }

    #[test]
    fn test_create_comment_input_ignores_extra_fields() {
        let input: CreateCommentInput =
            serde_json::from_str(r#"{"username": "lurker", "body": "hi", "votes": 99}"#).unwrap();

        assert_eq!(input.body.as_deref(), Some("hi"));
    }
}
