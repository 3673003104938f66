//! Storage seams used by the booking engine.
//!
//! Reads through [`BookingStore`] never lock. Writes that touch a barber's
//! calendar go through a [`BarberDayTx`], which serializes every writer for
//! the same `(barber, local date)` and applies its staged changes all or
//! nothing on [`BarberDayTx::commit`]. Dropping the handle without
//! committing discards them.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use salon_core::result::AppResult;
use salon_core::types::pagination::{PageRequest, PageResponse};
use salon_entity::barber::model::Barber;
use salon_entity::block::model::BlockedRange;
use salon_entity::booking::{Booking, BookingFilter, BookingStatus};
use salon_entity::interval::TimeRange;
use salon_entity::salon::{Salon, WeeklyHours};
use salon_entity::service::model::Service;

/// The unit of serialization: one barber on one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarberDay {
    pub barber_id: Uuid,
    /// Local date in the salon's offset.
    pub date: NaiveDate,
    /// UTC instants covered by `date`.
    pub window: TimeRange,
}

impl BarberDay {
    pub fn new(barber_id: Uuid, date: NaiveDate, window: TimeRange) -> Self {
        Self {
            barber_id,
            date,
            window,
        }
    }
}

/// Salons, barbers and services.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_salon(&self, salon: &Salon) -> AppResult<Salon>;

    async fn find_salon(&self, id: Uuid) -> AppResult<Option<Salon>>;

    async fn insert_barber(&self, barber: &Barber) -> AppResult<Barber>;

    async fn find_barber(&self, id: Uuid) -> AppResult<Option<Barber>>;

    /// The barber whose linked account (or own id) is `user_id`.
    async fn find_barber_for_user(&self, user_id: Uuid) -> AppResult<Option<Barber>>;

    /// Barbers of a salon, oldest first.
    async fn list_barbers(&self, salon_id: Uuid) -> AppResult<Vec<Barber>>;

    /// Replace a barber's hours profile; `None` follows the salon again.
    async fn set_barber_hours(
        &self,
        barber_id: Uuid,
        hours: Option<WeeklyHours>,
    ) -> AppResult<Option<Barber>>;

    async fn insert_service(&self, service: &Service) -> AppResult<Service>;

    async fn find_service(&self, id: Uuid) -> AppResult<Option<Service>>;

    /// Services of a salon, oldest first.
    async fn list_services(&self, salon_id: Uuid) -> AppResult<Vec<Service>>;

    /// Persist every mutable field of `service`.
    async fn update_service(&self, service: &Service) -> AppResult<Service>;
}

/// Bookings and blocked ranges.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Open the critical section for `day`. Waits while another writer
    /// holds the same day.
    async fn begin_barber_day(&self, day: BarberDay) -> AppResult<Box<dyn BarberDayTx>>;

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Pending or confirmed bookings of a barber overlapping `window`.
    async fn active_bookings(&self, barber_id: Uuid, window: TimeRange) -> AppResult<Vec<Booking>>;

    /// Blocks of a barber overlapping `window`.
    async fn blocks(&self, barber_id: Uuid, window: TimeRange) -> AppResult<Vec<BlockedRange>>;

    /// Bookings matching `filter`, latest appointment first.
    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>>;
}

/// Writes against one barber-day, applied on commit.
///
/// Reads through the handle see the committed state plus this handle's
/// own staged writes.
#[async_trait]
pub trait BarberDayTx: Send {
    /// Pending or confirmed bookings on the day.
    async fn active_bookings(&mut self) -> AppResult<Vec<Booking>>;

    /// Blocks on the day.
    async fn blocks(&mut self) -> AppResult<Vec<BlockedRange>>;

    /// Re-read a booking under the day's lock.
    async fn find_booking(&mut self, id: Uuid) -> AppResult<Option<Booking>>;

    async fn insert_booking(&mut self, booking: &Booking) -> AppResult<()>;

    async fn update_booking_status(
        &mut self,
        id: Uuid,
        status: BookingStatus,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> AppResult<()>;

    async fn insert_block(&mut self, block: &BlockedRange) -> AppResult<()>;

    /// Remove the day's blocks starting exactly at one of `starts`.
    /// Returns how many were removed.
    async fn delete_blocks_starting_at(&mut self, starts: &[DateTime<Utc>]) -> AppResult<u64>;

    /// Apply every staged write atomically.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
