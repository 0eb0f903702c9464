//! Article model
//!
//! This module defines the Article entity, its list view, and the options
//! accepted when listing articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity with its comment count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Unique identifier
    pub article_id: i64,
    /// Article title
    pub title: String,
    /// Slug of the topic the article is filed under
    pub topic: String,
    /// Username of the author
    pub author: String,
    /// Full article text
    pub body: String,
    /// Publication timestamp
    pub created_at: DateTime<Utc>,
    /// Net vote count, may be negative
    pub votes: i64,
    /// Cover image URL
    pub article_img_url: Option<String>,
    /// Number of comments on the article
    pub comment_count: i64,
}

/// Article as shown in listings: everything but the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleSummary {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

/// Column an article listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSortField {
    ArticleId,
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl ArticleSortField {
    /// SQL expression to order by. Only these fixed strings ever reach a query.
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::ArticleId => "a.article_id",
            Self::Title => "a.title",
            Self::Topic => "a.topic",
            Self::Author => "a.author",
            Self::CreatedAt => "a.created_at",
            Self::Votes => "a.votes",
            Self::CommentCount => "comment_count",
        }
    }
}

impl std::fmt::Display for ArticleSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ArticleId => "article_id",
            Self::Title => "title",
            Self::Topic => "topic",
            Self::Author => "author",
            Self::CreatedAt => "created_at",
            Self::Votes => "votes",
            Self::CommentCount => "comment_count",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ArticleSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article_id" => Ok(Self::ArticleId),
            "title" => Ok(Self::Title),
            "topic" => Ok(Self::Topic),
            "author" => Ok(Self::Author),
            "created_at" => Ok(Self::CreatedAt),
            "votes" => Ok(Self::Votes),
            "comment_count" => Ok(Self::CommentCount),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Options for listing articles. Defaults to every article, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Only include articles in this topic
    pub topic: Option<String>,
    pub sort_by: ArticleSortField,
    pub order: SortOrder,
}

impl ArticleQuery {
    /// Build a query from raw, optional request parameters.
    ///
    /// An empty `topic` is treated as absent.
    pub fn from_params(
        topic: Option<String>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Self, String> {
        let sort_by = sort_by
            .map(str::parse::<ArticleSortField>)
            .transpose()?
            .unwrap_or_default();
        let order = order
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            topic: topic.filter(|t| !t.is_empty()),
            sort_by,
            order,
        })
    }

    /// Filter on a topic
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// ORDER BY clause for this query. Ties fall back to the article id.
    pub fn order_clause(&self) -> String {
        let direction = self.order.as_sql();
        format!(
            "{} {}, a.article_id {}",
            self.sort_by.as_column(),
            direction,
            direction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article() -> Article {
        Article {
            article_id: 1,
            title: "Living in the shadow of a great man".to_string(),
            topic: "mitch".to_string(),
            author: "butter_bridge".to_string(),
            body: "I find this existence challenging".to_string(),
            created_at: Utc.with_ymd_and_hms(2020, 7, 9, 20, 11, 0).unwrap(),
            votes: 100,
            article_img_url: None,
            comment_count: 11,
        }
    }

    #[test]
    fn test_created_at_serializes_as_rfc3339() {
        let json = serde_json::to_value(sample_article()).unwrap();
        assert_eq!(json["created_at"], "2020-07-09T20:11:00Z");
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!("votes".parse::<ArticleSortField>().unwrap(), ArticleSortField::Votes);
        assert_eq!(
            "comment_count".parse::<ArticleSortField>().unwrap(),
            ArticleSortField::CommentCount
        );
        assert!("body".parse::<ArticleSortField>().is_err());
        assert!("votes; DROP TABLE articles".parse::<ArticleSortField>().is_err());
    }

    #[test]
    fn test_sort_order_is_case_insensitive() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query = ArticleQuery::from_params(None, None, None).unwrap();

        assert_eq!(query, ArticleQuery::default());
        assert_eq!(query.order_clause(), "a.created_at DESC, a.article_id DESC");
    }

    #[test]
    fn test_query_from_params() {
        let query =
            ArticleQuery::from_params(Some("cats".to_string()), Some("title"), Some("asc")).unwrap();

        assert_eq!(query.topic.as_deref(), Some("cats"));
        assert_eq!(query.order_clause(), "a.title ASC, a.article_id ASC");
    }

    #[test]
    fn test_query_empty_topic_is_ignored() {
        let query = ArticleQuery::from_params(Some(String::new()), None, None).unwrap();
        assert!(query.topic.is_none());
    }

    #[test]
    fn test_query_rejects_invalid_options() {
        assert!(ArticleQuery::from_params(None, Some("nope"), None).is_err());
        assert!(ArticleQuery::from_params(None, None, Some("up")).is_err());
    }
}
