//! Booking store backend selection.

use serde::{Deserialize, Serialize};

/// Which store implementation backs catalog and booking data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL with advisory locks and an exclusion constraint.
    #[default]
    Postgres,
    /// Process-local maps guarded by per barber-day mutexes.
    ///
    /// Only correct while a single process serves all requests.
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
}
