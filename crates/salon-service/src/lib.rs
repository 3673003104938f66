//! # salon-service
//!
//! Business logic for SalonBook: slot computation, the availability
//! ledger, conflict-free reservation and the booking lifecycle. Services
//! receive their stores and cache through constructor injection and know
//! nothing about which backend is behind them.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod context;
pub mod policy;

pub use availability::{AvailabilityService, SlotCache};
pub use booking::{BookingService, LifecycleService, ReservationService};
pub use catalog::CatalogService;
pub use context::RequestContext;
