//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use salon_core::types::pagination::PageRequest;
use salon_entity::booking::{BookingStatus, PaymentOption};
use salon_entity::salon::WeeklyHours;
use salon_entity::service::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, UpdateService};
use salon_service::booking::{BookingQuery, ReserveRequest};

/// `?date=YYYY-MM-DD&serviceId=...`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub service_id: Uuid,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// Body of the block and unblock endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SlotsRequest {
    /// Slot start instants.
    #[validate(length(min = 1, max = 96, message = "Between 1 and 96 slots per request"))]
    pub slots: Vec<DateTime<Utc>>,
}

/// Replace a barber's weekly hours; `null` reverts to the salon's.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BarberHoursRequest {
    #[serde(default)]
    pub working_hours: Option<WeeklyHours>,
}

/// `POST /api/bookings`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub barber_id: Uuid,
    pub service_id: Uuid,
    /// Defaults to the caller when the caller is a client.
    pub client_id: Option<Uuid>,
    pub time_slot: DateTime<Utc>,
    /// Defaults to `deposit`.
    pub payment_option: Option<PaymentOption>,
    #[validate(range(min = 0, message = "depositAmount must not be negative"))]
    pub deposit_amount: Option<i64>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<CreateBookingRequest> for ReserveRequest {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            barber_id: req.barber_id,
            service_id: req.service_id,
            client_id: req.client_id,
            time_slot: req.time_slot,
            payment_option: req.payment_option.unwrap_or(PaymentOption::Deposit),
            deposit_amount: req.deposit_amount,
            notes: req.notes,
        }
    }
}

/// `PATCH /api/bookings/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// `GET /api/bookings` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsQuery {
    pub barber_id: Option<Uuid>,
    pub salon_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl ListBookingsQuery {
    /// Split into service filters and a clamped page request.
    pub fn into_parts(self) -> (BookingQuery, PageRequest) {
        let defaults = PageRequest::default();
        let page = PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.page_size),
        );
        let query = BookingQuery {
            barber_id: self.barber_id,
            salon_id: self.salon_id,
            client_id: self.client_id,
            date: self.date,
            status: self.status,
        };
        (query, page)
    }
}

/// `POST /api/salons`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalonRequest {
    /// Defaults to the caller.
    pub owner_id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = -840, max = 840))]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub working_hours: WeeklyHours,
}

/// `POST /api/salons/{id}/barbers`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBarberRequest {
    /// User account that signs in as this barber.
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub working_hours: Option<WeeklyHours>,
}

/// `POST /api/salons/{id}/services`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = MIN_DURATION_MINUTES, max = MAX_DURATION_MINUTES))]
    pub duration_minutes: i32,
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 60))]
    pub category: String,
}

/// `PATCH /api/services/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = MIN_DURATION_MINUTES, max = MAX_DURATION_MINUTES))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateServiceRequest> for UpdateService {
    fn from(req: UpdateServiceRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            duration_minutes: req.duration_minutes,
            price: req.price,
            category: req.category,
            is_active: req.is_active,
        }
    }
}

fn default_category() -> String {
    "general".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_request_uses_camel_case() {
        let json = r#"{
            "barberId": "6f0e4c1e-8a53-4d49-9b7e-0c6f0b7d9a11",
            "serviceId": "2b1d9a3e-54a0-4f6b-8f0c-1d2e3f4a5b6c",
            "timeSlot": "2030-06-03T10:00:00Z"
        }"#;
        let req: CreateBookingRequest = serde_json::from_str(json).unwrap();
        assert!(req.client_id.is_none());
        let reserve = ReserveRequest::from(req);
        assert_eq!(reserve.payment_option, PaymentOption::Deposit);
    }

    #[test]
    fn test_service_duration_bounds() {
        let req = CreateServiceRequest {
            title: "Trim".into(),
            description: None,
            duration_minutes: 2,
            price: 1_000,
            category: "haircut".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_slot_list_rejected() {
        let req = SlotsRequest { slots: Vec::new() };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_query_clamps_page_size() {
        let query = ListBookingsQuery {
            per_page: Some(1_000),
            ..Default::default()
        };
        let (_, page) = query.into_parts();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 100);
    }
}
