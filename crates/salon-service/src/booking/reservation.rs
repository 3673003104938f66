//! The reservation engine.
//!
//! Reserving a slot is the only read-modify-write on a barber's calendar
//! that clients trigger concurrently. All of it runs inside a
//! [`BarberDayTx`](salon_database::store::BarberDayTx): the busy set is
//! recomputed, checked and extended while every other writer for the same
//! barber-day waits. A request abandoned midway drops the handle and
//! leaves nothing behind.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use salon_core::config::BookingConfig;
use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_database::store::{BookingStore, CatalogStore};
use salon_entity::booking::{Booking, PaymentOption, PaymentSnapshot};
use salon_entity::interval::TimeRange;

use crate::availability::calendar;
use crate::availability::ledger;
use crate::availability::{BarberSchedule, SlotCache};
use crate::context::RequestContext;
use crate::policy;

/// A client's request for one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub barber_id: Uuid,
    pub service_id: Uuid,
    /// Defaults to the actor when the actor is a client.
    pub client_id: Option<Uuid>,
    pub time_slot: DateTime<Utc>,
    pub payment_option: PaymentOption,
    /// Deposit override for [`PaymentOption::Deposit`].
    pub deposit_amount: Option<i64>,
    pub notes: Option<String>,
}

/// Turns free slots into pending bookings, at most one per interval.
#[derive(Clone)]
pub struct ReservationService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    slot_cache: SlotCache,
    config: BookingConfig,
}

impl ReservationService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        slot_cache: SlotCache,
        config: BookingConfig,
    ) -> Self {
        Self {
            catalog,
            bookings,
            slot_cache,
            config,
        }
    }

    /// Reserve `req.time_slot` for the service's duration.
    ///
    /// Fails with `OutOfHours` when the interval leaves the barber's hours
    /// or crosses midnight, and with `Conflict` when it overlaps a pending
    /// or confirmed booking or a blocked range. Identical repeated requests
    /// are not deduplicated: the second one conflicts with the first.
    pub async fn reserve(&self, ctx: &RequestContext, req: ReserveRequest) -> AppResult<Booking> {
        let client_id = resolve_client(ctx, req.client_id)?;

        let schedule = BarberSchedule::load(self.catalog.as_ref(), req.barber_id).await?;
        if !ctx.is_client()
            && !policy::can_manage_calendar(ctx, &schedule.salon, &schedule.barber)
        {
            return Err(AppError::authorization("Staff may only book on calendars they manage"));
        }
        let service = self
            .catalog
            .find_service(req.service_id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))?;
        if service.salon_id != schedule.salon.id {
            return Err(AppError::validation("Service is not offered at this barber's salon"));
        }
        if !schedule.is_bookable() {
            return Err(AppError::validation("Barber is not accepting bookings"));
        }
        if !service.is_active {
            return Err(AppError::validation("Service is not currently bookable"));
        }

        let requested = TimeRange::from_minutes(req.time_slot, i64::from(service.duration_minutes));
        let date = schedule.date_of(req.time_slot);
        calendar::ensure_within_hours(&schedule.hours_on(date), &requested, schedule.offset())?;

        let payment = PaymentSnapshot::compute(
            service.price,
            req.payment_option,
            req.deposit_amount,
            self.config.default_deposit_ratio,
        )?;

        let mut tx = self.bookings.begin_barber_day(schedule.day(date)).await?;
        let active = tx.active_bookings().await?;
        let blocks = tx.blocks().await?;
        let busy = ledger::busy_intervals(&active, &blocks);
        if !ledger::is_free(&busy, &requested) {
            warn!(
                barber_id = %req.barber_id,
                client_id = %client_id,
                time_slot = %req.time_slot,
                "Reservation rejected: slot is busy"
            );
            return Err(AppError::conflict(
                "Requested time overlaps an existing booking or blocked range",
            ));
        }

        let booking = Booking::pending(
            schedule.salon.id,
            schedule.barber.id,
            service.id,
            client_id,
            requested,
            payment,
            req.notes,
        );
        tx.insert_booking(&booking).await?;
        tx.commit().await?;

        self.slot_cache.invalidate_day(booking.barber_id, date).await;
        info!(
            booking_id = %booking.id,
            booking_code = %booking.booking_code,
            barber_id = %booking.barber_id,
            client_id = %booking.client_id,
            time_slot = %booking.time_slot,
            duration_minutes = booking.duration_minutes,
            "Booking reserved"
        );
        Ok(booking)
    }
}

/// Clients book for themselves; staff must name the client.
fn resolve_client(ctx: &RequestContext, requested: Option<Uuid>) -> AppResult<Uuid> {
    if ctx.is_client() {
        return match requested {
            Some(id) if id != ctx.actor_id => Err(AppError::authorization(
                "Clients may only book for themselves",
            )),
            _ => Ok(ctx.actor_id),
        };
    }
    requested.ok_or_else(|| AppError::validation("clientId is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_entity::actor::ActorRole;

    #[test]
    fn test_client_defaults_to_actor() {
        let ctx = RequestContext::new(Uuid::new_v4(), ActorRole::Client);
        assert_eq!(resolve_client(&ctx, None).unwrap(), ctx.actor_id);
        assert_eq!(resolve_client(&ctx, Some(ctx.actor_id)).unwrap(), ctx.actor_id);
        assert!(resolve_client(&ctx, Some(Uuid::new_v4())).is_err());
    }

    #[test]
    fn test_staff_must_name_client() {
        let ctx = RequestContext::new(Uuid::new_v4(), ActorRole::Owner);
        assert!(resolve_client(&ctx, None).is_err());
        let client = Uuid::new_v4();
        assert_eq!(resolve_client(&ctx, Some(client)).unwrap(), client);
    }
}
