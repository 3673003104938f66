//! PostgreSQL booking store.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::debug;
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_core::types::pagination::{PageRequest, PageResponse};
use salon_entity::block::BlockedRange;
use salon_entity::booking::{Booking, BookingFilter, BookingStatus};
use salon_entity::interval::TimeRange;

use crate::store::{BarberDay, BarberDayTx, BookingStore};

const ACTIVE_BOOKINGS_SQL: &str = "SELECT * FROM bookings \
     WHERE barber_id = $1 AND status IN ('pending', 'confirmed') \
     AND time_slot < $3 AND end_at > $2 \
     ORDER BY time_slot ASC";

const BLOCKS_SQL: &str = "SELECT * FROM blocked_ranges \
     WHERE barber_id = $1 AND start_at < $3 AND end_at > $2 \
     ORDER BY start_at ASC";

/// Bookings and blocks in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Advisory lock key for a barber-day. Collisions only over-serialize.
pub fn advisory_key(barber_id: Uuid, date: NaiveDate) -> i64 {
    let (hi, lo) = barber_id.as_u64_pair();
    let day = date.num_days_from_ce() as u64;
    (hi ^ lo ^ day.wrapping_mul(0x9E37_79B9_7F4A_7C15)) as i64
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &BookingFilter) {
    qb.push(" WHERE TRUE");
    if let Some(client_id) = filter.client_id {
        qb.push(" AND client_id = ").push_bind(client_id);
    }
    if let Some(barber_id) = filter.barber_id {
        qb.push(" AND barber_id = ").push_bind(barber_id);
    }
    if let Some(salon_id) = filter.salon_id {
        qb.push(" AND salon_id = ").push_bind(salon_id);
    }
    if let Some(from) = filter.from {
        qb.push(" AND time_slot >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND time_slot < ").push_bind(to);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn begin_barber_day(&self, day: BarberDay) -> AppResult<Box<dyn BarberDayTx>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_sqlx("Failed to begin transaction", e))?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(advisory_key(day.barber_id, day.date))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to lock barber day", e))?;
        debug!(barber_id = %day.barber_id, date = %day.date, "Acquired barber-day advisory lock");

        Ok(Box::new(PgDayTx { tx, day }))
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to find booking", e))
    }

    async fn active_bookings(&self, barber_id: Uuid, window: TimeRange) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(ACTIVE_BOOKINGS_SQL)
            .bind(barber_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to load bookings", e))
    }

    async fn blocks(&self, barber_id: Uuid, window: TimeRange) -> AppResult<Vec<BlockedRange>> {
        sqlx::query_as::<_, BlockedRange>(BLOCKS_SQL)
            .bind(barber_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to load blocked ranges", e))
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM bookings");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to count bookings", e))?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM bookings");
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY time_slot DESC, created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);
        let bookings = select
            .build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

/// A transaction holding the barber-day advisory lock. Rolled back by
/// sqlx when dropped uncommitted.
struct PgDayTx {
    tx: Transaction<'static, Postgres>,
    day: BarberDay,
}

#[async_trait]
impl BarberDayTx for PgDayTx {
    async fn active_bookings(&mut self) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(ACTIVE_BOOKINGS_SQL)
            .bind(self.day.barber_id)
            .bind(self.day.window.start)
            .bind(self.day.window.end)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to load bookings", e))
    }

    async fn blocks(&mut self) -> AppResult<Vec<BlockedRange>> {
        sqlx::query_as::<_, BlockedRange>(BLOCKS_SQL)
            .bind(self.day.barber_id)
            .bind(self.day.window.start)
            .bind(self.day.window.end)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to load blocked ranges", e))
    }

    async fn find_booking(&mut self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to find booking", e))
    }

    async fn insert_booking(&mut self, booking: &Booking) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO bookings (id, booking_code, salon_id, barber_id, service_id, client_id, \
             time_slot, end_at, duration_minutes, status, payment_status, payment_method, \
             amount_total, deposit_paid, balance_remaining, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, \
             $10, $11, $12, $13, $14, $15, $16, $17, $18)",
        )
        .bind(booking.id)
        .bind(&booking.booking_code)
        .bind(booking.salon_id)
        .bind(booking.barber_id)
        .bind(booking.service_id)
        .bind(booking.client_id)
        .bind(booking.time_slot)
        .bind(booking.end_at)
        .bind(booking.duration_minutes)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(booking.payment_method)
        .bind(booking.amount_total)
        .bind(booking.deposit_paid)
        .bind(booking.balance_remaining)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create booking", e))?;
        Ok(())
    }

    async fn update_booking_status(
        &mut self,
        id: Uuid,
        status: BookingStatus,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $2, notes = COALESCE($3, notes), updated_at = $4 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(notes)
        .bind(at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to update booking status", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Booking not found"));
        }
        Ok(())
    }

    async fn insert_block(&mut self, block: &BlockedRange) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO blocked_ranges (id, barber_id, start_at, end_at, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(block.id)
        .bind(block.barber_id)
        .bind(block.start_at)
        .bind(block.end_at)
        .bind(block.created_by)
        .bind(block.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create blocked range", e))?;
        Ok(())
    }

    async fn delete_blocks_starting_at(&mut self, starts: &[DateTime<Utc>]) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM blocked_ranges \
             WHERE barber_id = $1 AND start_at = ANY($2) AND start_at >= $3 AND end_at <= $4",
        )
        .bind(self.day.barber_id)
        .bind(starts)
        .bind(self.day.window.start)
        .bind(self.day.window.end)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to delete blocked ranges", e))?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| AppError::from_sqlx("Failed to commit barber day", e))
    }
}
