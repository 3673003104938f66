//! Route definitions for the SalonBook HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::Router;
use axum::routing::{get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route mounted under `/api`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(availability_routes())
        .merge(booking_routes())
        .merge(catalog_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Slot queries, busy view, blocking and barber hours
fn availability_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/availability/{barber_id}",
            get(handlers::availability::available_slots)
                .put(handlers::availability::set_barber_hours),
        )
        .route(
            "/availability/{barber_id}/busy",
            get(handlers::availability::busy_intervals),
        )
        .route(
            "/availability/{barber_id}/block",
            post(handlers::availability::block_slots),
        )
        .route(
            "/availability/{barber_id}/unblock",
            post(handlers::availability::unblock_slots),
        )
}

/// Reservation, lifecycle and reads
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/status",
            patch(handlers::booking::update_status),
        )
        .route(
            "/bookings/{id}/cancel",
            patch(handlers::booking::cancel_booking),
        )
}

/// Salons, barbers and services
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/salons", post(handlers::salon::create_salon))
        .route("/salons/{id}", get(handlers::salon::get_salon))
        .route(
            "/salons/{id}/barbers",
            get(handlers::salon::list_barbers).post(handlers::salon::create_barber),
        )
        .route(
            "/salons/{id}/services",
            get(handlers::salon::list_services).post(handlers::salon::create_service),
        )
        .route("/services/{id}", patch(handlers::salon::update_service))
}

/// Health check (no actor required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
