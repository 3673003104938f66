//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use salon_core::traits::cache::CacheProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Reports 503 when PostgreSQL is configured but unreachable. A failing
/// cache only degrades the report since slots are recomputed on a miss.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.database {
        Some(pool) => match pool.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                "unreachable"
            }
        },
        None => "memory",
    };
    let cache = match state.cache.health_check().await {
        Ok(true) => "connected",
        Ok(false) | Err(_) => "unreachable",
    };

    let status = if database == "unreachable" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    let overall = if database == "unreachable" || cache == "unreachable" {
        "degraded"
    } else {
        "ok"
    };

    (
        status,
        Json(HealthResponse {
            status: overall.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
            cache: cache.to_string(),
        }),
    )
}
