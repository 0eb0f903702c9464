//! Data models
//!
//! Structures shared by the repositories, services and HTTP handlers:
//! - Database entities (Topic, User, Article, Comment)
//! - API request types (CreateCommentInput, ArticleQuery)

mod article;
mod comment;
mod topic;
mod user;

pub use article::{Article, ArticleQuery, ArticleSortField, ArticleSummary, SortOrder};
pub use comment::{Comment, CreateCommentInput};
pub use topic::Topic;
pub use user::User;
