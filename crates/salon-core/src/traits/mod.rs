//! Core traits defined in `salon-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
