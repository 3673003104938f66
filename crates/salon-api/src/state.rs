//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use salon_cache::CacheManager;
use salon_core::config::AppConfig;
use salon_database::{BookingStore, CatalogStore, DatabasePool};
use salon_service::{
    AvailabilityService, BookingService, CatalogService, LifecycleService, ReservationService,
    SlotCache,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent on the memory backend
    pub database: Option<DatabasePool>,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Services ─────────────────────────────────────────────
    /// Salons, barbers and services
    pub catalog: CatalogService,
    /// Slot queries and blocking
    pub availability: AvailabilityService,
    /// Booking creation
    pub reservations: ReservationService,
    /// Booking status changes
    pub lifecycle: LifecycleService,
    /// Booking reads
    pub bookings: BookingService,
}

impl AppState {
    /// Wire the services over the given stores.
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        cache: Arc<CacheManager>,
        database: Option<DatabasePool>,
    ) -> Self {
        let slot_cache = SlotCache::new(Arc::clone(&cache), config.booking.slot_cache_enabled);

        Self {
            catalog: CatalogService::new(Arc::clone(&catalog), slot_cache.clone()),
            availability: AvailabilityService::new(
                Arc::clone(&catalog),
                Arc::clone(&bookings),
                slot_cache.clone(),
                config.booking.clone(),
            ),
            reservations: ReservationService::new(
                Arc::clone(&catalog),
                Arc::clone(&bookings),
                slot_cache.clone(),
                config.booking.clone(),
            ),
            lifecycle: LifecycleService::new(
                Arc::clone(&catalog),
                Arc::clone(&bookings),
                slot_cache,
            ),
            bookings: BookingService::new(catalog, bookings),
            config: Arc::new(config),
            database,
            cache,
        }
    }
}
