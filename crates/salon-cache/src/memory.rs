//! In-memory cache provider backed by moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use salon_core::config::cache::MemoryCacheConfig;
use salon_core::result::AppResult;
use salon_core::traits::cache::CacheProvider;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Process-local cache. Entries are bounded by capacity and by the shorter
/// of their own TTL and the configured ceiling.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // Only trailing wildcards are used, so prefix matching suffices.
        let prefix = pattern.trim_end_matches('*');
        let doomed: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.to_string())
            .collect();

        for key in &doomed {
            self.cache.invalidate(key).await;
        }

        debug!(pattern, count = doomed.len(), "Invalidated cached entries");
        Ok(doomed.len() as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 100,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config, 60)
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = provider();
        cache.set_default("salon:slots:a", "[]").await.unwrap();
        assert_eq!(cache.get("salon:slots:a").await.unwrap().as_deref(), Some("[]"));

        cache.delete("salon:slots:a").await.unwrap();
        assert_eq!(cache.get("salon:slots:a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_pattern_only_hits_prefix() {
        let cache = provider();
        cache.set_default("salon:slots:b1:2030-06-03:s1", "1").await.unwrap();
        cache.set_default("salon:slots:b1:2030-06-03:s2", "2").await.unwrap();
        cache.set_default("salon:slots:b1:2030-06-04:s1", "3").await.unwrap();

        let removed = cache.delete_pattern("salon:slots:b1:2030-06-03:*").await.unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get("salon:slots:b1:2030-06-03:s1").await.unwrap().is_none());
        assert_eq!(
            cache.get("salon:slots:b1:2030-06-04:s1").await.unwrap().as_deref(),
            Some("3")
        );
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = provider();
        let slots = vec!["2030-06-03T09:00:00Z".to_string()];
        cache.set_json("k", &slots).await.unwrap();
        let back: Option<Vec<String>> = cache.get_json("k").await.unwrap();
        assert_eq!(back, Some(slots));
    }
}
