//! Barber entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::salon::WeeklyHours;

/// A staff member who takes bookings at exactly one salon.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    /// Unique barber identifier.
    pub id: Uuid,
    /// Salon the barber works at.
    pub salon_id: Uuid,
    /// Linked user account, if the barber can sign in.
    pub user_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Personal working hours; `None` follows the salon's hours.
    pub working_hours: Option<Json<WeeklyHours>>,
    /// Whether the barber currently accepts bookings.
    pub is_active: bool,
    /// When the barber was created.
    pub created_at: DateTime<Utc>,
    /// When the barber was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Barber {
    /// The hours that govern this barber's slots.
    pub fn effective_hours<'a>(&'a self, salon_hours: &'a WeeklyHours) -> &'a WeeklyHours {
        self.working_hours.as_deref().unwrap_or(salon_hours)
    }

    /// Whether the given user is this barber's own account.
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id) || self.id == user_id
    }
}

/// Data required to create a new barber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBarber {
    pub salon_id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub working_hours: Option<WeeklyHours>,
}
