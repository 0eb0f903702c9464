//! Newsroom - a REST API for a news site
//!
//! Topics, articles, comments and users stored in SQLite or MySQL and
//! served as JSON over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
