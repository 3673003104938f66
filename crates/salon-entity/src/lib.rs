//! # salon-entity
//!
//! Domain entity models for SalonBook. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.
//!
//! JSON field names follow the web client's camelCase contract.

pub mod actor;
pub mod barber;
pub mod block;
pub mod booking;
pub mod interval;
pub mod salon;
pub mod service;

pub use actor::ActorRole;
pub use interval::TimeRange;
pub use sqlx::types::Json;
