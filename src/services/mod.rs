//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories. They are
//! responsible for:
//! - Validating input
//! - Turning empty lookups into `NotFound` errors
//! - Classifying database failures

pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

pub use article::{ArticleService, ArticleServiceError};
pub use comment::{CommentService, CommentServiceError};
pub use topic::TopicService;
pub use user::UserService;
