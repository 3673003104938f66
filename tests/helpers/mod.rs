//! Shared helpers for HTTP tests against the in-memory backend.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use salon_cache::CacheManager;
use salon_core::config::{AppConfig, StorageBackend};
use salon_database::memory::{MemoryBookingStore, MemoryCatalogStore};

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Salon owner
    pub owner_id: Uuid,
    /// User account of the seeded barber
    pub barber_user_id: Uuid,
    pub salon_id: Uuid,
    pub barber_id: Uuid,
    /// 30-minute service priced 5000
    pub service_id: Uuid,
}

/// Response status and parsed JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Build the app and seed a salon open 09:00-17:00 (UTC) every day
    /// with one barber and one service.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let state = salon_api::AppState::new(
            config,
            Arc::new(MemoryCatalogStore::new()),
            Arc::new(MemoryBookingStore::new()),
            cache,
            None,
        );
        let router = salon_api::build_app(state);

        let mut app = Self {
            router,
            owner_id: Uuid::new_v4(),
            barber_user_id: Uuid::new_v4(),
            salon_id: Uuid::nil(),
            barber_id: Uuid::nil(),
            service_id: Uuid::nil(),
        };
        app.seed().await;
        app
    }

    async fn seed(&mut self) {
        let day = json!({ "open": "09:00", "close": "17:00" });
        let hours = json!({
            "monday": day, "tuesday": day, "wednesday": day, "thursday": day,
            "friday": day, "saturday": day, "sunday": day,
        });

        let owner = self.owner();
        let res = self
            .request(
                "POST",
                "/api/salons",
                Some(json!({
                    "name": "Fade Factory",
                    "address": "KN 5 Rd, Kigali",
                    "utcOffsetMinutes": 0,
                    "workingHours": hours,
                })),
                Some(owner),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        self.salon_id = id_of(&res.body["salon"]);

        let res = self
            .request(
                "POST",
                &format!("/api/salons/{}/barbers", self.salon_id),
                Some(json!({ "name": "Eric", "userId": self.barber_user_id })),
                Some(owner),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        self.barber_id = id_of(&res.body["barber"]);

        let res = self
            .request(
                "POST",
                &format!("/api/salons/{}/services", self.salon_id),
                Some(json!({
                    "title": "Skin fade",
                    "durationMinutes": 30,
                    "price": 5000,
                    "category": "haircut",
                })),
                Some(owner),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        self.service_id = id_of(&res.body["service"]);
    }

    /// Actor headers for the salon owner.
    pub fn owner(&self) -> (Uuid, &'static str) {
        (self.owner_id, "owner")
    }

    /// Actor headers for the seeded barber.
    pub fn barber(&self) -> (Uuid, &'static str) {
        (self.barber_user_id, "barber")
    }

    /// Reserve `time_slot` as a fresh client.
    pub async fn book(&self, time_slot: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/bookings",
            Some(json!({
                "barberId": self.barber_id,
                "serviceId": self.service_id,
                "timeSlot": time_slot,
                "paymentOption": "deposit",
            })),
            Some(client()),
        )
        .await
    }

    /// Slot list for the seeded barber and service.
    pub async fn slots(&self, date: &str) -> Vec<String> {
        let res = self
            .request(
                "GET",
                &format!(
                    "/api/availability/{}?date={date}&serviceId={}",
                    self.barber_id, self.service_id
                ),
                None,
                Some(client()),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        res.body["slots"]
            .as_array()
            .expect("slots array")
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        actor: Option<(Uuid, &str)>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some((id, role)) = actor {
            req = req
                .header("X-Actor-Id", id.to_string())
                .header("X-Actor-Role", role);
        }
        let req = req.body(Body::from(body_str)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Actor headers for a new client.
pub fn client() -> (Uuid, &'static str) {
    (Uuid::new_v4(), "client")
}

/// The `_id` of an entity in a response body.
pub fn id_of(entity: &Value) -> Uuid {
    entity["_id"]
        .as_str()
        .or_else(|| entity["id"].as_str())
        .and_then(|s| s.parse().ok())
        .expect("entity id")
}
