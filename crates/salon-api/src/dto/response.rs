//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salon_entity::block::BlockedRange;
use salon_entity::booking::Booking;
use salon_entity::interval::TimeRange;

/// `{ "slots": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<DateTime<Utc>>,
}

/// `{ "busy": [{ "start", "end" }] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyResponse {
    pub busy: Vec<TimeRange>,
}

/// Ranges created by a block request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResponse {
    pub blocked: Vec<BlockedRange>,
}

/// Count of ranges removed by an unblock request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnblockResponse {
    pub removed: u64,
}

/// `{ "booking": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking: Booking,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Booking store state.
    pub database: String,
    /// Cache provider state.
    pub cache: String,
}
