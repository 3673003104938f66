//! # salon-cache
//!
//! Cache providers for SalonBook. Two backends are available:
//!
//! - **memory**: in-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: shared cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The cache only ever holds derived data (computed slot lists), so every
//! caller treats a failing provider as a miss.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
