//! Convenience result type alias for SalonBook.

use crate::error::AppError;

/// A specialized `Result` type for SalonBook operations.
pub type AppResult<T> = Result<T, AppError>;
