//! Manually blocked time ranges.

pub mod model;

pub use model::BlockedRange;
