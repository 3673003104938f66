//! Salon, barber and service catalog handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use salon_entity::barber::CreateBarber;
use salon_entity::salon::CreateSalon;
use salon_entity::service::CreateService;

use crate::dto::request::{
    CreateBarberRequest, CreateSalonRequest, CreateServiceRequest, UpdateServiceRequest,
};
use crate::error::ApiError;
use crate::extractors::{Actor, ValidJson, ValidPath};
use crate::state::AppState;

/// POST /api/salons
pub async fn create_salon(
    State(state): State<AppState>,
    actor: Actor,
    ValidJson(req): ValidJson<CreateSalonRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let salon = state
        .catalog
        .create_salon(
            &actor,
            CreateSalon {
                owner_id: req.owner_id.unwrap_or(actor.actor_id),
                name: req.name,
                address: req.address,
                latitude: req.latitude,
                longitude: req.longitude,
                utc_offset_minutes: req.utc_offset_minutes,
                working_hours: req.working_hours,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "salon": salon }))))
}

/// GET /api/salons/{id}
pub async fn get_salon(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let salon = state.catalog.get_salon(id).await?;
    Ok(Json(serde_json::json!({ "salon": salon })))
}

/// POST /api/salons/{id}/barbers
pub async fn create_barber(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(salon_id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<CreateBarberRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let barber = state
        .catalog
        .create_barber(
            &actor,
            CreateBarber {
                salon_id,
                user_id: req.user_id,
                name: req.name,
                working_hours: req.working_hours,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "barber": barber }))))
}

/// GET /api/salons/{id}/barbers
pub async fn list_barbers(
    State(state): State<AppState>,
    ValidPath(salon_id): ValidPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let barbers = state.catalog.list_barbers(salon_id).await?;
    Ok(Json(serde_json::json!({ "barbers": barbers })))
}

/// POST /api/salons/{id}/services
pub async fn create_service(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(salon_id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let service = state
        .catalog
        .create_service(
            &actor,
            CreateService {
                salon_id,
                title: req.title,
                description: req.description,
                duration_minutes: req.duration_minutes,
                price: req.price,
                category: req.category,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "service": service }))))
}

/// GET /api/salons/{id}/services
pub async fn list_services(
    State(state): State<AppState>,
    ValidPath(salon_id): ValidPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let services = state.catalog.list_services(salon_id).await?;
    Ok(Json(serde_json::json!({ "services": services })))
}

/// PATCH /api/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    actor: Actor,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(req): ValidJson<UpdateServiceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let service = state.catalog.update_service(&actor, id, req.into()).await?;
    Ok(Json(serde_json::json!({ "service": service })))
}
