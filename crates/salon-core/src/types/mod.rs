//! Core type definitions used across the SalonBook workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
