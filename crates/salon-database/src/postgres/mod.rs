//! PostgreSQL stores.
//!
//! Writers for a barber-day take a transaction-scoped advisory lock, and
//! the `bookings_no_overlap` exclusion constraint rejects overlapping
//! active bookings even for writers that bypass the lock.

pub mod booking;
pub mod catalog;

pub use booking::PgBookingStore;
pub use catalog::PgCatalogStore;
