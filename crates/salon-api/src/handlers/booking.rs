//! Booking reservation, lifecycle and read handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use salon_core::types::pagination::PageResponse;
use salon_entity::booking::Booking;

use crate::dto::request::{CreateBookingRequest, ListBookingsQuery, UpdateStatusRequest};
use crate::dto::response::BookingResponse;
use crate::error::ApiError;
use crate::extractors::{Actor, ValidJson, ValidPath, ValidQuery};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    actor: Actor,
    ValidJson(req): ValidJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let booking = state.reservations.reserve(&actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    actor: Actor,
    ValidQuery(query): ValidQuery<ListBookingsQuery>,
) -> Result<Json<PageResponse<Booking>>, ApiError> {
    let (query, page) = query.into_parts();
    let bookings = state.bookings.list(&actor, query, page).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.bookings.get(&actor, id).await?;
    Ok(Json(BookingResponse { booking }))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .lifecycle
        .transition(&actor, id, req.status, req.notes)
        .await?;
    Ok(Json(BookingResponse { booking }))
}

/// PATCH /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.lifecycle.cancel(&actor, id, None).await?;
    Ok(Json(BookingResponse { booking }))
}
