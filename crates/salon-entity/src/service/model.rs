//! Service entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Shortest bookable service.
pub const MIN_DURATION_MINUTES: i32 = 5;
/// Longest bookable service.
pub const MAX_DURATION_MINUTES: i32 = 480;

/// A bookable service offered by a salon.
///
/// Bookings copy `duration_minutes` and `price` at creation, so edits here
/// never move existing bookings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Unique service identifier.
    pub id: Uuid,
    /// Salon offering the service.
    pub salon_id: Uuid,
    /// Title shown to clients.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Length of one appointment.
    pub duration_minutes: i32,
    /// Price in the salon's currency (whole units).
    pub price: i64,
    /// Free-form category (haircut, beard, ...).
    pub category: String,
    /// Whether the service can currently be booked.
    pub is_active: bool,
    /// When the service was created.
    pub created_at: DateTime<Utc>,
    /// When the service was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateService {
    pub salon_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: i64,
    pub category: String,
}

/// Partial update of a service. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateService {
    /// Apply the update to a service in place.
    pub fn apply(&self, service: &mut Service) {
        if let Some(title) = &self.title {
            service.title = title.clone();
        }
        if let Some(description) = &self.description {
            service.description = Some(description.clone());
        }
        if let Some(duration) = self.duration_minutes {
            service.duration_minutes = duration;
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(category) = &self.category {
            service.category = category.clone();
        }
        if let Some(active) = self.is_active {
            service.is_active = active;
        }
        service.updated_at = Utc::now();
    }
}
