//! Salon entity model.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::hours::WeeklyHours;

/// A salon and its operating hours.
///
/// Salons are never hard-deleted; `is_active` soft-disables them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Salon {
    /// Unique salon identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Latitude, when geocoded.
    pub latitude: Option<f64>,
    /// Longitude, when geocoded.
    pub longitude: Option<f64>,
    /// Offset of the salon's local clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
    /// Operating hours per weekday.
    pub working_hours: Json<WeeklyHours>,
    /// Whether an admin has verified the salon.
    pub verified: bool,
    /// Soft-disable flag.
    pub is_active: bool,
    /// When the salon was created.
    pub created_at: DateTime<Utc>,
    /// When the salon was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Salon {
    /// The salon's local clock offset.
    ///
    /// Out-of-range offsets (validated at creation) fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset_minutes)
    }
}

/// Build a [`FixedOffset`] from a minute count, falling back to UTC.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// Data required to create a new salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalon {
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub utc_offset_minutes: i32,
    pub working_hours: WeeklyHours,
}
