//! Salons, barbers and services.

pub mod service;

pub use service::CatalogService;
