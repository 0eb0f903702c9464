//! Custom Axum extractors
//!
//! Both reject with [`ApiError::BadRequest`] so malformed input gets the
//! standard 400 body instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::middleware::ApiError;

/// Extract a numeric id from the single path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid path: {}", e)))?;

        let id = raw
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request(format!("id is not a number: {}", raw)))?;

        Ok(Self(id))
    }
}

/// JSON body extractor with the standard 400 rejection
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        Ok(Self(value))
    }
}
