//! Slot computation and the availability ledger.

pub mod cache;
pub mod calendar;
pub mod ledger;
pub mod schedule;
pub mod service;

pub use cache::SlotCache;
pub use schedule::BarberSchedule;
pub use service::AvailabilityService;
