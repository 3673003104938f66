//! Booking reservation, lifecycle transitions and reads.

pub mod lifecycle;
pub mod reservation;
pub mod service;

pub use lifecycle::LifecycleService;
pub use reservation::{ReservationService, ReserveRequest};
pub use service::{BookingQuery, BookingService};
