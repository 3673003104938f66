//! Booking lifecycle state machine.
//!
//! Transitions follow [`BookingStatus::allowed_transitions`]. Cancelling
//! frees the interval at once because the ledger only counts pending and
//! confirmed bookings.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_database::store::{BookingStore, CatalogStore};
use salon_entity::booking::{Booking, BookingStatus};

use crate::availability::{BarberSchedule, SlotCache};
use crate::context::RequestContext;
use crate::policy;

/// Reject any move outside the transition table.
pub fn check_transition(current: BookingStatus, next: BookingStatus) -> AppResult<()> {
    if current.is_terminal() {
        return Err(AppError::invalid_transition(format!(
            "Booking is already {current}"
        )));
    }
    if !current.can_transition_to(next) {
        return Err(AppError::invalid_transition(format!(
            "Cannot move a booking from {current} to {next}"
        )));
    }
    Ok(())
}

/// Applies status changes requested by clients, barbers and managers.
#[derive(Clone)]
pub struct LifecycleService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    slot_cache: SlotCache,
}

impl LifecycleService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        slot_cache: SlotCache,
    ) -> Self {
        Self {
            catalog,
            bookings,
            slot_cache,
        }
    }

    /// Move a booking to `next`. `notes`, when given, replaces the
    /// booking's notes.
    ///
    /// The current status is re-read under the barber-day lock, so two
    /// racing transitions cannot both leave the same state.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        next: BookingStatus,
        notes: Option<String>,
    ) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;
        let schedule = BarberSchedule::load(self.catalog.as_ref(), booking.barber_id).await?;
        policy::ensure_can_transition(ctx, &booking, &schedule.salon, &schedule.barber, next)?;

        let date = schedule.date_of(booking.time_slot);
        let mut tx = self.bookings.begin_barber_day(schedule.day(date)).await?;
        let mut current = tx
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if let Err(e) = check_transition(current.status, next) {
            warn!(
                booking_id = %booking_id,
                from = %current.status,
                to = %next,
                actor_id = %ctx.actor_id,
                "Transition rejected"
            );
            return Err(e);
        }

        let now = Utc::now();
        tx.update_booking_status(booking_id, next, notes.as_deref(), now)
            .await?;
        tx.commit().await?;
        self.slot_cache.invalidate_day(current.barber_id, date).await;

        info!(
            booking_id = %booking_id,
            barber_id = %current.barber_id,
            from = %current.status,
            to = %next,
            actor_id = %ctx.actor_id,
            "Booking status changed"
        );

        current.status = next;
        if notes.is_some() {
            current.notes = notes;
        }
        current.updated_at = now;
        Ok(current)
    }

    /// Shortcut for `transition(.., Cancelled, ..)`.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        notes: Option<String>,
    ) -> AppResult<Booking> {
        self.transition(ctx, booking_id, BookingStatus::Cancelled, notes)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_core::error::ErrorKind;

    #[test]
    fn test_terminal_states_reject_everything() {
        for terminal in [BookingStatus::Completed, BookingStatus::Cancelled] {
            for next in BookingStatus::ALL {
                let err = check_transition(terminal, next).unwrap_err();
                assert_eq!(err.kind, ErrorKind::InvalidTransition);
            }
        }
    }

    #[test]
    fn test_table_rows() {
        assert!(check_transition(BookingStatus::Pending, BookingStatus::Confirmed).is_ok());
        assert!(check_transition(BookingStatus::Pending, BookingStatus::Cancelled).is_ok());
        assert!(check_transition(BookingStatus::Confirmed, BookingStatus::Completed).is_ok());
        assert!(check_transition(BookingStatus::Confirmed, BookingStatus::Cancelled).is_ok());
        assert!(check_transition(BookingStatus::Pending, BookingStatus::Completed).is_err());
        assert!(check_transition(BookingStatus::Confirmed, BookingStatus::Pending).is_err());
        assert!(check_transition(BookingStatus::Pending, BookingStatus::Pending).is_err());
    }
}
