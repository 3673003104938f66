//! Slot query, busy view, blocking and barber hours handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{BarberHoursRequest, DateQuery, SlotQuery, SlotsRequest};
use crate::dto::response::{BlockResponse, BusyResponse, SlotsResponse, UnblockResponse};
use crate::error::ApiError;
use crate::extractors::{Actor, ValidJson, ValidPath, ValidQuery};
use crate::state::AppState;

/// GET /api/availability/{barber_id}?date=&serviceId=
pub async fn available_slots(
    State(state): State<AppState>,
    _actor: Actor,
    ValidPath(barber_id): ValidPath<Uuid>,
    ValidQuery(query): ValidQuery<SlotQuery>,
) -> Result<Json<SlotsResponse>, ApiError> {
    let slots = state
        .availability
        .available_slots(barber_id, query.service_id, query.date)
        .await?;
    Ok(Json(SlotsResponse { slots }))
}

/// GET /api/availability/{barber_id}/busy?date=
pub async fn busy_intervals(
    State(state): State<AppState>,
    _actor: Actor,
    ValidPath(barber_id): ValidPath<Uuid>,
    ValidQuery(query): ValidQuery<DateQuery>,
) -> Result<Json<BusyResponse>, ApiError> {
    let busy = state
        .availability
        .busy_intervals(barber_id, query.date)
        .await?;
    Ok(Json(BusyResponse { busy }))
}

/// POST /api/availability/{barber_id}/block
pub async fn block_slots(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(barber_id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<SlotsRequest>,
) -> Result<(StatusCode, Json<BlockResponse>), ApiError> {
    let blocked = state
        .availability
        .block_slots(&actor, barber_id, &req.slots)
        .await?;
    Ok((StatusCode::CREATED, Json(BlockResponse { blocked })))
}

/// POST /api/availability/{barber_id}/unblock
pub async fn unblock_slots(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(barber_id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<SlotsRequest>,
) -> Result<Json<UnblockResponse>, ApiError> {
    let removed = state
        .availability
        .unblock_slots(&actor, barber_id, &req.slots)
        .await?;
    Ok(Json(UnblockResponse { removed }))
}

/// PUT /api/availability/{barber_id}
pub async fn set_barber_hours(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(barber_id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<BarberHoursRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let barber = state
        .catalog
        .set_barber_hours(&actor, barber_id, req.working_hours)
        .await?;
    Ok(Json(serde_json::json!({ "barber": barber })))
}
