//! Custom Axum extractors
//!
//! Wrap the stock extractors so decoding failures come back as
//! `ApiError::Unprocessable` JSON instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body extractor with API-shaped rejections
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Unprocessable {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Query string extractor with API-shaped rejections
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Unprocessable {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Extract an integer expense id from the single path parameter
pub struct ExpenseId(pub i64);

impl<S> FromRequestParts<S> for ExpenseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Unprocessable {
                message: rejection.body_text(),
            })?;

        let id = raw.parse::<i64>().map_err(|_| ExpenseId::invalid(&raw))?;

        Ok(Self(id))
    }
}

impl ExpenseId {
    /// Rejection for a path segment that is not an integer id
    pub fn invalid(raw: &str) -> ApiError {
        ApiError::Unprocessable {
            message: format!("expense id must be an integer, got '{}'", raw),
        }
    }
}
