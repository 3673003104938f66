//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every section has defaults so a missing file still yields a
//! runnable in-memory configuration.

pub mod app;
pub mod booking;
pub mod cache;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::booking::BookingConfig;
pub use self::cache::CacheConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::{StorageBackend, StorageConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Booking store backend selection.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Slot and reservation policy.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SALON__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SALON")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations the services cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(granularity) = self.booking.slot_granularity_minutes {
            if granularity == 0 {
                return Err(AppError::configuration(
                    "booking.slot_granularity_minutes must be positive",
                ));
            }
        }
        if self.booking.block_minutes == 0 {
            return Err(AppError::configuration("booking.block_minutes must be positive"));
        }
        if !(0.0..=1.0).contains(&self.booking.default_deposit_ratio) {
            return Err(AppError::configuration(
                "booking.default_deposit_ratio must be within 0..=1",
            ));
        }
        if !matches!(self.cache.provider.as_str(), "memory" | "redis") {
            return Err(AppError::configuration(format!(
                "Unknown cache provider: {}",
                self.cache.provider
            )));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(AppError::configuration(format!(
                "Unknown log format: {}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.cache.provider, "memory");
        assert_eq!(config.booking.block_minutes, 30);
        assert!(config.booking.slot_granularity_minutes.is_none());
    }

    #[test]
    fn test_zero_granularity_rejected() {
        let mut config = AppConfig::default();
        config.booking.slot_granularity_minutes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deposit_ratio_bounds() {
        let mut config = AppConfig::default();
        config.booking.default_deposit_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = AppConfig::default();
        config.cache.provider = "memcached".into();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
