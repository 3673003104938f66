//! Booking domain entities.

pub mod model;
pub mod payment;
pub mod status;

pub use model::{Booking, BookingFilter, generate_booking_code};
pub use payment::{PaymentMethod, PaymentOption, PaymentSnapshot, PaymentStatus};
pub use status::BookingStatus;
