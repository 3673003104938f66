//! In-memory booking store with per-barber-day write serialization.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_core::types::pagination::{PageRequest, PageResponse};
use salon_entity::block::BlockedRange;
use salon_entity::booking::{Booking, BookingFilter, BookingStatus};
use salon_entity::interval::TimeRange;

use crate::store::{BarberDay, BarberDayTx, BookingStore};

type DayKey = (Uuid, NaiveDate);

#[derive(Debug, Clone, Default)]
struct Ledger {
    bookings: HashMap<Uuid, Booking>,
    blocks: HashMap<Uuid, BlockedRange>,
}

#[derive(Debug, Default)]
struct Shared {
    ledger: RwLock<Ledger>,
    day_locks: DashMap<DayKey, Arc<Mutex<()>>>,
}

/// Bookings and blocks held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    shared: Arc<Shared>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of barber-days with a live lock entry.
    pub fn locked_days(&self) -> usize {
        self.shared.day_locks.len()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn begin_barber_day(&self, day: BarberDay) -> AppResult<Box<dyn BarberDayTx>> {
        let lock = self
            .shared
            .day_locks
            .entry((day.barber_id, day.date))
            .or_default()
            .clone();
        let guard = lock.lock_owned().await;
        debug!(barber_id = %day.barber_id, date = %day.date, "Acquired barber-day lock");

        Ok(Box::new(MemoryDayTx {
            shared: Arc::clone(&self.shared),
            day,
            guard: Some(guard),
            staged: Vec::new(),
        }))
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self.shared.ledger.read().await.bookings.get(&id).cloned())
    }

    async fn active_bookings(&self, barber_id: Uuid, window: TimeRange) -> AppResult<Vec<Booking>> {
        let ledger = self.shared.ledger.read().await;
        Ok(day_bookings(&ledger, barber_id, window))
    }

    async fn blocks(&self, barber_id: Uuid, window: TimeRange) -> AppResult<Vec<BlockedRange>> {
        let ledger = self.shared.ledger.read().await;
        Ok(day_blocks(&ledger, barber_id, window))
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let ledger = self.shared.ledger.read().await;
        let mut matched: Vec<&Booking> = ledger
            .bookings
            .values()
            .filter(|b| filter.matches(b))
            .collect();
        matched.sort_by(|a, b| {
            b.time_slot
                .cmp(&a.time_slot)
                .then(b.created_at.cmp(&a.created_at))
        });

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}

fn day_bookings(ledger: &Ledger, barber_id: Uuid, window: TimeRange) -> Vec<Booking> {
    let mut bookings: Vec<Booking> = ledger
        .bookings
        .values()
        .filter(|b| b.barber_id == barber_id && b.is_active() && b.range().overlaps(&window))
        .cloned()
        .collect();
    bookings.sort_by_key(|b| b.time_slot);
    bookings
}

fn day_blocks(ledger: &Ledger, barber_id: Uuid, window: TimeRange) -> Vec<BlockedRange> {
    let mut blocks: Vec<BlockedRange> = ledger
        .blocks
        .values()
        .filter(|b| b.barber_id == barber_id && b.range().overlaps(&window))
        .cloned()
        .collect();
    blocks.sort_by_key(|b| b.start_at);
    blocks
}

#[derive(Debug, Clone)]
enum Staged {
    InsertBooking(Booking),
    UpdateStatus {
        id: Uuid,
        status: BookingStatus,
        notes: Option<String>,
        at: DateTime<Utc>,
    },
    InsertBlock(BlockedRange),
    DeleteBlocks(Vec<DateTime<Utc>>),
}

impl Staged {
    fn apply(&self, ledger: &mut Ledger, day: &BarberDay) {
        match self {
            Self::InsertBooking(booking) => {
                ledger.bookings.insert(booking.id, booking.clone());
            }
            Self::UpdateStatus {
                id,
                status,
                notes,
                at,
            } => {
                if let Some(booking) = ledger.bookings.get_mut(id) {
                    booking.status = *status;
                    if notes.is_some() {
                        booking.notes = notes.clone();
                    }
                    booking.updated_at = *at;
                }
            }
            Self::InsertBlock(block) => {
                ledger.blocks.insert(block.id, block.clone());
            }
            Self::DeleteBlocks(starts) => {
                ledger.blocks.retain(|_, b| {
                    !(b.barber_id == day.barber_id
                        && day.window.contains(&b.range())
                        && starts.contains(&b.start_at))
                });
            }
        }
    }
}

/// Write handle for one barber-day. Holds the day's mutex until dropped.
#[derive(Debug)]
struct MemoryDayTx {
    shared: Arc<Shared>,
    day: BarberDay,
    guard: Option<OwnedMutexGuard<()>>,
    staged: Vec<Staged>,
}

impl MemoryDayTx {
    /// Committed state of the day with this handle's staged writes applied.
    async fn view(&self) -> Ledger {
        let mut view = day_view(&*self.shared.ledger.read().await, &self.day);
        for op in &self.staged {
            op.apply(&mut view, &self.day);
        }
        view
    }
}

/// The bookings (any status) and blocks of one barber-day.
fn day_view(ledger: &Ledger, day: &BarberDay) -> Ledger {
    Ledger {
        bookings: ledger
            .bookings
            .values()
            .filter(|b| b.barber_id == day.barber_id && b.range().overlaps(&day.window))
            .map(|b| (b.id, b.clone()))
            .collect(),
        blocks: day_blocks(ledger, day.barber_id, day.window)
            .into_iter()
            .map(|b| (b.id, b))
            .collect(),
    }
}

#[async_trait]
impl BarberDayTx for MemoryDayTx {
    async fn active_bookings(&mut self) -> AppResult<Vec<Booking>> {
        let view = self.view().await;
        Ok(day_bookings(&view, self.day.barber_id, self.day.window))
    }

    async fn blocks(&mut self) -> AppResult<Vec<BlockedRange>> {
        let view = self.view().await;
        Ok(day_blocks(&view, self.day.barber_id, self.day.window))
    }

    async fn find_booking(&mut self, id: Uuid) -> AppResult<Option<Booking>> {
        if let Some(found) = self.view().await.bookings.remove(&id) {
            return Ok(Some(found));
        }
        Ok(self.shared.ledger.read().await.bookings.get(&id).cloned())
    }

    async fn insert_booking(&mut self, booking: &Booking) -> AppResult<()> {
        self.staged.push(Staged::InsertBooking(booking.clone()));
        Ok(())
    }

    async fn update_booking_status(
        &mut self,
        id: Uuid,
        status: BookingStatus,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        if !self.view().await.bookings.contains_key(&id) {
            return Err(AppError::not_found("Booking not found"));
        }
        self.staged.push(Staged::UpdateStatus {
            id,
            status,
            notes: notes.map(str::to_string),
            at,
        });
        Ok(())
    }

    async fn insert_block(&mut self, block: &BlockedRange) -> AppResult<()> {
        self.staged.push(Staged::InsertBlock(block.clone()));
        Ok(())
    }

    async fn delete_blocks_starting_at(&mut self, starts: &[DateTime<Utc>]) -> AppResult<u64> {
        let removed = self
            .view()
            .await
            .blocks
            .values()
            .filter(|b| self.day.window.contains(&b.range()) && starts.contains(&b.start_at))
            .count() as u64;
        self.staged.push(Staged::DeleteBlocks(starts.to_vec()));
        Ok(removed)
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        let staged = std::mem::take(&mut self.staged);
        let mut ledger = self.shared.ledger.write().await;

        // Mirror the database constraints before touching shared state.
        let mut check = day_view(&ledger, &self.day);
        for op in &staged {
            op.apply(&mut check, &self.day);
        }
        let active = day_bookings(&check, self.day.barber_id, self.day.window);
        if active.windows(2).any(|pair| pair[0].range().overlaps(&pair[1].range())) {
            return Err(AppError::conflict("Requested time overlaps an existing booking"));
        }
        for op in &staged {
            if let Staged::InsertBooking(booking) = op {
                let duplicate = ledger
                    .bookings
                    .values()
                    .any(|b| b.booking_code == booking.booking_code);
                if duplicate {
                    return Err(AppError::conflict("Booking code already exists"));
                }
            }
        }

        for op in &staged {
            op.apply(&mut ledger, &self.day);
        }
        Ok(())
    }
}

impl Drop for MemoryDayTx {
    fn drop(&mut self) {
        // Release first so the strong count below only sees waiters.
        self.guard.take();
        self.shared
            .day_locks
            .remove_if(&(self.day.barber_id, self.day.date), |_, lock| {
                Arc::strong_count(lock) == 1
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use salon_entity::booking::{PaymentOption, PaymentSnapshot};

    fn day(barber_id: Uuid) -> BarberDay {
        let start = Utc.with_ymd_and_hms(2030, 6, 3, 0, 0, 0).unwrap();
        BarberDay::new(
            barber_id,
            start.date_naive(),
            TimeRange::new(start, start + Duration::days(1)),
        )
    }

    fn booking(barber_id: Uuid, hour: u32) -> Booking {
        let start = Utc.with_ymd_and_hms(2030, 6, 3, hour, 0, 0).unwrap();
        let payment = PaymentSnapshot::compute(1000, PaymentOption::Cash, None, 0.5).unwrap();
        Booking::pending(
            Uuid::new_v4(),
            barber_id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            TimeRange::from_minutes(start, 30),
            payment,
            None,
        )
    }

    #[tokio::test]
    async fn test_uncommitted_writes_are_discarded() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        tx.insert_booking(&booking(barber, 10)).await.unwrap();
        assert_eq!(tx.active_bookings().await.unwrap().len(), 1);
        drop(tx);

        let window = day(barber).window;
        assert!(store.active_bookings(barber, window).await.unwrap().is_empty());
        assert_eq!(store.locked_days(), 0);
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();
        let first = booking(barber, 10);

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        tx.insert_booking(&first).await.unwrap();
        tx.commit().await.unwrap();

        let found = store.find_booking(first.id).await.unwrap().unwrap();
        assert_eq!(found.booking_code, first.booking_code);
    }

    #[tokio::test]
    async fn test_commit_rejects_overlap() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        tx.insert_booking(&booking(barber, 10)).await.unwrap();
        tx.insert_booking(&booking(barber, 10)).await.unwrap();
        let err = tx.commit().await.unwrap_err();
        assert_eq!(err.kind, salon_core::error::ErrorKind::Conflict);

        let window = day(barber).window;
        assert!(store.active_bookings(barber, window).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_leaves_other_days_untouched() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();
        let other_barber = Uuid::new_v4();
        let theirs = booking(other_barber, 10);

        let mut tx = store.begin_barber_day(day(other_barber)).await.unwrap();
        tx.insert_booking(&theirs).await.unwrap();
        tx.commit().await.unwrap();

        // Same hour on another barber's calendar does not conflict.
        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        tx.insert_booking(&booking(barber, 10)).await.unwrap();
        tx.commit().await.unwrap();

        let window = day(barber).window;
        assert_eq!(store.active_bookings(barber, window).await.unwrap().len(), 1);
        let kept = store.active_bookings(other_barber, window).await.unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, theirs.id);
    }

    #[tokio::test]
    async fn test_cancelled_booking_leaves_active_set() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();
        let first = booking(barber, 10);

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        tx.insert_booking(&first).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        tx.update_booking_status(first.id, BookingStatus::Cancelled, Some("sick"), Utc::now())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let window = day(barber).window;
        assert!(store.active_bookings(barber, window).await.unwrap().is_empty());
        let stored = store.find_booking(first.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
        assert_eq!(stored.notes.as_deref(), Some("sick"));
    }

    #[tokio::test]
    async fn test_same_day_writers_are_serialized() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();

        let held = store.begin_barber_day(day(barber)).await.unwrap();
        let waiting = {
            let store = store.clone();
            tokio::spawn(async move { store.begin_barber_day(day(barber)).await.map(|_| ()) })
        };
        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        // A different barber is not blocked.
        let other = store.begin_barber_day(day(Uuid::new_v4())).await.unwrap();
        drop(other);

        drop(held);
        waiting.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_delete_blocks_by_exact_start() {
        let store = MemoryBookingStore::new();
        let barber = Uuid::new_v4();
        let at = |h, m| Utc.with_ymd_and_hms(2030, 6, 3, h, m, 0).unwrap();

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        for start in [at(9, 0), at(9, 30)] {
            let block = BlockedRange::new(barber, TimeRange::from_minutes(start, 30), barber);
            tx.insert_block(&block).await.unwrap();
        }
        tx.commit().await.unwrap();

        let mut tx = store.begin_barber_day(day(barber)).await.unwrap();
        let removed = tx.delete_blocks_starting_at(&[at(9, 30), at(9, 15)]).await.unwrap();
        assert_eq!(removed, 1);
        tx.commit().await.unwrap();

        let remaining = store.blocks(barber, day(barber).window).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].start_at, at(9, 0));
    }
}
