//! Route handlers organized by domain.

pub mod availability;
pub mod booking;
pub mod health;
pub mod salon;
