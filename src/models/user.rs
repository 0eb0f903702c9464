//! User model

use serde::{Deserialize, Serialize};

/// Registered user. Articles and comments reference users by `username`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique login name
    pub username: String,
    /// Display name
    pub name: String,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_without_avatar() {
        let user: User =
            serde_json::from_str(r#"{"username": "lurker", "name": "do_nothing"}"#).unwrap();

        assert_eq!(user.username, "lurker");
        assert_eq!(user.name, "do_nothing");
        assert!(user.avatar_url.is_none());
    }
}
