//! Blocked range entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::interval::TimeRange;

/// A range during which a barber has marked themselves unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlockedRange {
    /// Unique block identifier.
    pub id: Uuid,
    /// Barber whose calendar is blocked.
    pub barber_id: Uuid,
    /// Inclusive start.
    pub start_at: DateTime<Utc>,
    /// Exclusive end.
    pub end_at: DateTime<Utc>,
    /// User who created the block.
    pub created_by: Uuid,
    /// When the block was created.
    pub created_at: DateTime<Utc>,
}

impl BlockedRange {
    /// Create a new block for `range`.
    pub fn new(barber_id: Uuid, range: TimeRange, created_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            barber_id,
            start_at: range.start,
            end_at: range.end,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// The blocked interval.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_at, self.end_at)
    }
}
