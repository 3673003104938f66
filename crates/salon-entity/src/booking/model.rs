//! Booking entity model.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::payment::{PaymentMethod, PaymentSnapshot, PaymentStatus};
use super::status::BookingStatus;
use crate::interval::TimeRange;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_SUFFIX_LEN: usize = 5;

/// A client's appointment with one barber for one service.
///
/// The JSON field names are consumed verbatim by the client dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Human-readable reference (`BK…`).
    #[serde(rename = "bookingId")]
    pub booking_code: String,
    pub salon_id: Uuid,
    pub barber_id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    /// Appointment start.
    pub time_slot: DateTime<Utc>,
    /// Appointment end, `time_slot + duration_minutes`.
    pub end_at: DateTime<Utc>,
    /// Service duration copied at reservation time.
    pub duration_minutes: i32,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub amount_total: i64,
    pub deposit_paid: i64,
    pub balance_remaining: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a fresh pending booking occupying `range`.
    pub fn pending(
        salon_id: Uuid,
        barber_id: Uuid,
        service_id: Uuid,
        client_id: Uuid,
        range: TimeRange,
        payment: PaymentSnapshot,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            booking_code: generate_booking_code(),
            salon_id,
            barber_id,
            service_id,
            client_id,
            time_slot: range.start,
            end_at: range.end,
            duration_minutes: range.duration().num_minutes() as i32,
            status: BookingStatus::Pending,
            payment_status: payment.payment_status,
            payment_method: payment.payment_method,
            amount_total: payment.amount_total,
            deposit_paid: payment.deposit_paid,
            balance_remaining: payment.balance_remaining,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// The interval this booking covers.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.time_slot, self.end_at)
    }

    /// Whether this booking currently holds its interval.
    pub fn is_active(&self) -> bool {
        self.status.occupies_slot()
    }
}

/// Filters for listing bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub client_id: Option<Uuid>,
    pub barber_id: Option<Uuid>,
    pub salon_id: Option<Uuid>,
    /// Bookings whose start falls in `[from, to)`.
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Whether `booking` passes every set filter.
    pub fn matches(&self, booking: &Booking) -> bool {
        self.client_id.is_none_or(|id| booking.client_id == id)
            && self.barber_id.is_none_or(|id| booking.barber_id == id)
            && self.salon_id.is_none_or(|id| booking.salon_id == id)
            && self.from.is_none_or(|from| booking.time_slot >= from)
            && self.to.is_none_or(|to| booking.time_slot < to)
            && self.status.is_none_or(|status| booking.status == status)
    }
}

/// Generate a booking reference: `BK`, epoch millis, five random
/// uppercase alphanumerics.
pub fn generate_booking_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("BK{}{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::PaymentOption;
    use chrono::TimeZone;

    fn sample() -> Booking {
        let start = Utc.with_ymd_and_hms(2030, 6, 3, 10, 0, 0).unwrap();
        let payment = PaymentSnapshot::compute(4000, PaymentOption::Deposit, None, 0.5).unwrap();
        Booking::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            TimeRange::from_minutes(start, 30),
            payment,
            None,
        )
    }

    #[test]
    fn test_booking_code_format() {
        let code = generate_booking_code();
        assert!(code.starts_with("BK"));
        let suffix = &code[code.len() - CODE_SUFFIX_LEN..];
        assert!(suffix.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert!(code[2..code.len() - CODE_SUFFIX_LEN].bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_pending_copies_snapshot() {
        let booking = sample();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.duration_minutes, 30);
        assert_eq!(booking.deposit_paid, 2000);
        assert_eq!(booking.balance_remaining, 2000);
        assert!(booking.is_active());
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        for field in [
            "_id",
            "bookingId",
            "status",
            "timeSlot",
            "amountTotal",
            "depositPaid",
            "balanceRemaining",
            "paymentStatus",
            "paymentMethod",
            "clientId",
            "barberId",
            "salonId",
            "serviceId",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["status"], "pending");
        assert_eq!(value["paymentStatus"], "partial");
    }

    #[test]
    fn test_filter() {
        let booking = sample();
        let mut filter = BookingFilter {
            barber_id: Some(booking.barber_id),
            ..Default::default()
        };
        assert!(filter.matches(&booking));
        filter.status = Some(BookingStatus::Cancelled);
        assert!(!filter.matches(&booking));
    }
}
