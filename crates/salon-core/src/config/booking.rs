//! Slot generation and reservation policy.

use serde::{Deserialize, Serialize};

/// Booking policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Step between candidate slot starts. `None` steps by the service
    /// duration, which keeps a day free of unbookable fragments.
    #[serde(default)]
    pub slot_granularity_minutes: Option<u32>,
    /// Length of the range blocked from each slot start sent to the block endpoint.
    #[serde(default = "default_block_minutes")]
    pub block_minutes: u32,
    /// Share of the price taken as deposit when the client picks a deposit
    /// without naming an amount.
    #[serde(default = "default_deposit_ratio")]
    pub default_deposit_ratio: f64,
    /// Whether slot query results are cached.
    #[serde(default = "default_true")]
    pub slot_cache_enabled: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            slot_granularity_minutes: None,
            block_minutes: default_block_minutes(),
            default_deposit_ratio: default_deposit_ratio(),
            slot_cache_enabled: true,
        }
    }
}

fn default_block_minutes() -> u32 {
    30
}

fn default_deposit_ratio() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}
