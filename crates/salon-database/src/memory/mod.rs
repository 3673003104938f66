//! In-process stores.
//!
//! Writers for a barber-day are serialized by an async mutex that lives in
//! this process only. Running more than one server instance against the
//! memory backend therefore loses the no-double-booking guarantee; use the
//! PostgreSQL stores for any multi-process deployment.

pub mod booking;
pub mod catalog;

pub use booking::MemoryBookingStore;
pub use catalog::MemoryCatalogStore;
