//! Topic model

use serde::{Deserialize, Serialize};

/// A subject articles are filed under, keyed by its slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

impl Topic {
    pub fn new(slug: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_serializes_flat() {
        let topic = Topic::new("cats", "Not dogs");
        let json = serde_json::to_value(&topic).unwrap();

        assert_eq!(json, serde_json::json!({"slug": "cats", "description": "Not dogs"}));
    }
}
