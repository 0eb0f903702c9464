//! API layer - HTTP handlers and routing
//!
//! All routes live under `/api`:
//! - Endpoint listing and health check
//! - Topic, user, article and comment endpoints
//!
//! Anything else answers 404 `{"msg": "path not found"}`.

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod topics;
pub mod users;


use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use extractors::{ValidId, ValidJson};
pub use middleware::{ApiError, AppState, ErrorBody};

/// Build the API routes
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(endpoints::router())
        .merge(topics::router())
        .merge(articles::router())
        .merge(comments::router())
        .merge(users::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    with_middleware(build_api_router(), state, cors_origin)
}

fn with_middleware(routes: Router<AppState>, state: AppState, cors_origin: &str) -> Router {
    routes
        .fallback(middleware::path_not_found)
        .method_not_allowed_fallback(middleware::path_not_found)
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origin; `*` allows any origin.
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            cors.allow_origin(Any)
        }
    }
}
