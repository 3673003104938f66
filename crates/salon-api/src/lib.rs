//! # salon-api
//!
//! HTTP API layer for SalonBook built on Axum.
//!
//! Provides the availability, booking and catalog endpoints, the actor
//! extractor, request DTOs with validation, middleware and the mapping from
//! [`salon_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
