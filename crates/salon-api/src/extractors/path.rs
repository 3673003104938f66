//! Path parameter extractor with JSON error bodies.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use salon_core::error::AppError;

use crate::error::ApiError;

/// Like [`Path`], but an unparsable segment (e.g. a malformed UUID)
/// becomes a `VALIDATION` error.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::validation(rejection.body_text()))?;
        Ok(ValidPath(value))
    }
}
