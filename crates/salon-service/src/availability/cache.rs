//! Best-effort cache of computed slot lists.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use salon_cache::CacheManager;
use salon_cache::keys;
use salon_core::traits::cache::CacheProvider;

const EPOCH_STRIPES: usize = 64;

/// Invalidation counters. A barber-day maps to one stripe; barber-wide and
/// global invalidations bump the shared counter.
#[derive(Debug)]
struct Epochs {
    global: AtomicU64,
    stripes: [AtomicU64; EPOCH_STRIPES],
}

impl Epochs {
    fn new() -> Self {
        Self {
            global: AtomicU64::new(0),
            stripes: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    fn stripe(&self, barber_id: Uuid, date: NaiveDate) -> &AtomicU64 {
        let mut hasher = DefaultHasher::new();
        (barber_id, date).hash(&mut hasher);
        &self.stripes[(hasher.finish() % EPOCH_STRIPES as u64) as usize]
    }

    fn current(&self, barber_id: Uuid, date: NaiveDate) -> u64 {
        self.global
            .load(Ordering::SeqCst)
            .wrapping_add(self.stripe(barber_id, date).load(Ordering::SeqCst))
    }
}

/// Slot-list cache. Failures are logged and treated as misses, so the
/// cache never decides whether a slot is bookable.
///
/// A list is only kept if no invalidation touched its day while it was
/// being computed: callers take [`SlotCache::epoch`] before reading the
/// store and hand it back to [`SlotCache::put`].
#[derive(Debug, Clone)]
pub struct SlotCache {
    cache: Option<Arc<CacheManager>>,
    epochs: Arc<Epochs>,
}

impl SlotCache {
    pub fn new(cache: Arc<CacheManager>, enabled: bool) -> Self {
        Self {
            cache: enabled.then_some(cache),
            epochs: Arc::new(Epochs::new()),
        }
    }

    /// Invalidation epoch of a barber-day.
    pub fn epoch(&self, barber_id: Uuid, date: NaiveDate) -> u64 {
        self.epochs.current(barber_id, date)
    }

    pub async fn get(
        &self,
        barber_id: Uuid,
        date: NaiveDate,
        service_id: Uuid,
    ) -> Option<Vec<DateTime<Utc>>> {
        let cache = self.cache.as_ref()?;
        let key = keys::slots(barber_id, date, service_id);
        match cache.get_json(&key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(key = %key, error = %e, "Slot cache read failed");
                None
            }
        }
    }

    /// Store a slot list computed at `epoch`. Skipped, or undone, when the
    /// day was invalidated in the meantime.
    pub async fn put(
        &self,
        barber_id: Uuid,
        date: NaiveDate,
        service_id: Uuid,
        slots: &[DateTime<Utc>],
        epoch: u64,
    ) {
        let Some(cache) = &self.cache else {
            return;
        };
        if self.epoch(barber_id, date) != epoch {
            debug!(barber_id = %barber_id, date = %date, "Slot list outdated, not cached");
            return;
        }
        let key = keys::slots(barber_id, date, service_id);
        if let Err(e) = cache.set_json(&key, &slots).await {
            warn!(key = %key, error = %e, "Slot cache write failed");
            return;
        }
        // An invalidation that raced the write has already deleted its keys.
        if self.epoch(barber_id, date) == epoch {
            return;
        }
        if let Err(e) = cache.delete(&key).await {
            warn!(key = %key, error = %e, "Slot cache write could not be undone");
        }
    }

    /// Drop every slot list of a barber-day.
    pub async fn invalidate_day(&self, barber_id: Uuid, date: NaiveDate) {
        self.epochs.stripe(barber_id, date).fetch_add(1, Ordering::SeqCst);
        self.invalidate(keys::slots_for_day(barber_id, date)).await;
    }

    /// Drop every slot list of a barber.
    pub async fn invalidate_barber(&self, barber_id: Uuid) {
        self.epochs.global.fetch_add(1, Ordering::SeqCst);
        self.invalidate(keys::slots_for_barber(barber_id)).await;
    }

    /// Drop every slot list.
    pub async fn invalidate_all(&self) {
        self.epochs.global.fetch_add(1, Ordering::SeqCst);
        self.invalidate(keys::all_slots()).await;
    }

    async fn invalidate(&self, pattern: String) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.delete_pattern(&pattern).await {
            warn!(pattern = %pattern, error = %e, "Slot cache invalidation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use salon_cache::memory::MemoryCacheProvider;
    use salon_core::config::cache::MemoryCacheConfig;

    fn slot_cache() -> SlotCache {
        let provider = MemoryCacheProvider::new(
            &MemoryCacheConfig {
                max_capacity: 100,
                time_to_live_seconds: 60,
            },
            60,
        );
        SlotCache::new(Arc::new(CacheManager::from_provider(Arc::new(provider))), true)
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()
    }

    #[tokio::test]
    async fn test_list_computed_before_invalidation_is_not_stored() {
        let cache = slot_cache();
        let (barber, service) = (Uuid::new_v4(), Uuid::new_v4());
        let slots = vec![Utc.with_ymd_and_hms(2030, 6, 3, 9, 0, 0).unwrap()];

        let epoch = cache.epoch(barber, monday());
        cache.invalidate_day(barber, monday()).await;
        cache.put(barber, monday(), service, &slots, epoch).await;
        assert!(cache.get(barber, monday(), service).await.is_none());

        let epoch = cache.epoch(barber, monday());
        cache.put(barber, monday(), service, &slots, epoch).await;
        assert_eq!(cache.get(barber, monday(), service).await, Some(slots));
    }

    #[tokio::test]
    async fn test_barber_invalidation_moves_every_day() {
        let cache = slot_cache();
        let barber = Uuid::new_v4();
        let tuesday = monday().succ_opt().unwrap();
        let before = (cache.epoch(barber, monday()), cache.epoch(barber, tuesday));

        cache.invalidate_barber(barber).await;
        assert_ne!(cache.epoch(barber, monday()), before.0);
        assert_ne!(cache.epoch(barber, tuesday), before.1);
    }
}
