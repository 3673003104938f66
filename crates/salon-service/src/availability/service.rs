//! Slot query service and manual blocking.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use salon_core::config::BookingConfig;
use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_database::store::{BookingStore, CatalogStore};
use salon_entity::block::BlockedRange;
use salon_entity::interval::TimeRange;

use super::cache::SlotCache;
use super::calendar;
use super::ledger;
use super::schedule::BarberSchedule;
use crate::context::RequestContext;
use crate::policy;

/// Answers "when can this barber take this service" and maintains the
/// barber's manually blocked ranges.
///
/// Slot queries are lock-free and may be stale by the time a client
/// reserves; the reservation path re-validates under the barber-day lock.
#[derive(Clone)]
pub struct AvailabilityService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    slot_cache: SlotCache,
    config: BookingConfig,
}

impl AvailabilityService {
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

    /// Merged busy ranges of a barber on a salon-local date.
    pub async fn busy_intervals(
        &self,
        barber_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeRange>> {
        let schedule = BarberSchedule::load(self.catalog.as_ref(), barber_id).await?;
        self.load_busy(&schedule, date).await
    }

    /// Bookable slot starts for a service on a salon-local date.
    pub async fn available_slots(
        &self,
        barber_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<DateTime<Utc>>> {
        let schedule = BarberSchedule::load(self.catalog.as_ref(), barber_id).await?;
        let service = self
            .catalog
            .find_service(service_id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))?;
        if service.salon_id != schedule.salon.id {
            return Err(AppError::validation("Service is not offered at this barber's salon"));
        }
        if !service.is_active || !schedule.is_bookable() {
            return Ok(Vec::new());
        }

        if let Some(slots) = self.slot_cache.get(barber_id, date, service_id).await {
            debug!(barber_id = %barber_id, date = %date, "Slot cache hit");
            return Ok(slots);
        }

        let epoch = self.slot_cache.epoch(barber_id, date);
        let duration = service.duration_minutes.max(0) as u32;
        let granularity = self.config.slot_granularity_minutes.unwrap_or(duration);
        let candidates = calendar::generate_slots(
            &schedule.hours_on(date),
            duration,
            granularity,
            date,
            schedule.offset(),
        );
        let busy = self.load_busy(&schedule, date).await?;
        let slots = ledger::free_slots(candidates, duration, &busy);

        self.slot_cache.put(barber_id, date, service_id, &slots, epoch).await;
        Ok(slots)
    }

    /// Block `block_minutes` from each slot start.
    ///
    /// All slots must fall on one salon-local day, which is written in a
    /// single transaction. Starts that already begin a block are skipped. A
    /// slot overlapping a pending or confirmed booking fails the whole
    /// request with `Conflict`.
    pub async fn block_slots(
        &self,
        ctx: &RequestContext,
        barber_id: Uuid,
        slots: &[DateTime<Utc>],
    ) -> AppResult<Vec<BlockedRange>> {
        let schedule = self.load_for_calendar_write(ctx, barber_id, slots).await?;
        let length = i64::from(self.config.block_minutes);
        let (date, starts) = single_day(&schedule, slots)?;

        let window = calendar::day_window(date, schedule.offset());
        if starts
            .iter()
            .any(|s| TimeRange::from_minutes(*s, length).end > window.end)
        {
            return Err(AppError::out_of_hours("Blocked ranges cannot span midnight"));
        }

        let mut tx = self.bookings.begin_barber_day(schedule.day(date)).await?;
        let active = tx.active_bookings().await?;
        let existing = tx.blocks().await?;

        let mut created = Vec::new();
        for start in starts {
            if existing.iter().any(|b| b.start_at == start) {
                continue;
            }
            let range = TimeRange::from_minutes(start, length);
            if let Some(clash) = active.iter().find(|b| b.range().overlaps(&range)) {
                warn!(
                    barber_id = %barber_id,
                    booking_id = %clash.id,
                    slot = %start,
                    "Block rejected: overlaps booking"
                );
                return Err(AppError::conflict(format!(
                    "Slot {start} overlaps booking {}",
                    clash.booking_code
                )));
            }
            let block = BlockedRange::new(barber_id, range, ctx.actor_id);
            tx.insert_block(&block).await?;
            created.push(block);
        }

        tx.commit().await?;
        self.slot_cache.invalidate_day(barber_id, date).await;

        info!(
            barber_id = %barber_id,
            actor_id = %ctx.actor_id,
            %date,
            blocked = created.len(),
            "Slots blocked"
        );
        Ok(created)
    }

    /// Remove blocks starting exactly at one of `slots`, all on one
    /// salon-local day. Returns how many were removed.
    pub async fn unblock_slots(
        &self,
        ctx: &RequestContext,
        barber_id: Uuid,
        slots: &[DateTime<Utc>],
    ) -> AppResult<u64> {
        let schedule = self.load_for_calendar_write(ctx, barber_id, slots).await?;
        let (date, starts) = single_day(&schedule, slots)?;

        let mut tx = self.bookings.begin_barber_day(schedule.day(date)).await?;
        let starts: Vec<_> = starts.into_iter().collect();
        let removed = tx.delete_blocks_starting_at(&starts).await?;
        tx.commit().await?;
        self.slot_cache.invalidate_day(barber_id, date).await;

        info!(
            barber_id = %barber_id,
            actor_id = %ctx.actor_id,
            %date,
            removed,
            "Slots unblocked"
        );
        Ok(removed)
    }

    async fn load_for_calendar_write(
        &self,
        ctx: &RequestContext,
        barber_id: Uuid,
        slots: &[DateTime<Utc>],
    ) -> AppResult<BarberSchedule> {
        if slots.is_empty() {
            return Err(AppError::validation("At least one slot is required"));
        }
        let schedule = BarberSchedule::load(self.catalog.as_ref(), barber_id).await?;
        if !policy::can_manage_calendar(ctx, &schedule.salon, &schedule.barber) {
            return Err(AppError::authorization(
                "Only the barber or the salon's managers may change this calendar",
            ));
        }
        Ok(schedule)
    }

    async fn load_busy(
        &self,
        schedule: &BarberSchedule,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeRange>> {
        let window = calendar::day_window(date, schedule.offset());
        let bookings = self
            .bookings
            .active_bookings(schedule.barber.id, window)
            .await?;
        let blocks = self.bookings.blocks(schedule.barber.id, window).await?;
        Ok(ledger::busy_intervals(&bookings, &blocks))
    }
}

/// The one salon-local day `slots` fall on, with the starts deduplicated.
fn single_day(
    schedule: &BarberSchedule,
    slots: &[DateTime<Utc>],
) -> AppResult<(NaiveDate, BTreeSet<DateTime<Utc>>)> {
    let mut days: BTreeSet<NaiveDate> = slots.iter().map(|s| schedule.date_of(*s)).collect();
    let date = days
        .pop_first()
        .ok_or_else(|| AppError::validation("At least one slot is required"))?;
    if !days.is_empty() {
        return Err(AppError::validation("All slots must fall on the same day"));
    }
    Ok((date, slots.iter().copied().collect()))
}
