//! Redis connection management.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use salon_core::config::cache::RedisCacheConfig;
use salon_core::error::{AppError, ErrorKind};
use salon_core::result::AppResult;

/// Reconnecting Redis connection plus the key namespace of this deployment.
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        info!(prefix = %config.key_prefix, "Connecting to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Invalid Redis URL", e)
        })?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Cannot reach Redis", e)
        })?;

        info!("Redis connection ready");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// A handle to the shared connection; cheap to clone.
    pub fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// `key` inside this deployment's namespace.
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}
