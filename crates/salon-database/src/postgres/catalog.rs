//! PostgreSQL catalog store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_entity::barber::Barber;
use salon_entity::salon::{Salon, WeeklyHours};
use salon_entity::service::Service;

use crate::store::CatalogStore;

/// Salons, barbers and services in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn insert_salon(&self, salon: &Salon) -> AppResult<Salon> {
        sqlx::query_as::<_, Salon>(
            "INSERT INTO salons (id, owner_id, name, address, latitude, longitude, \
             utc_offset_minutes, working_hours, verified, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(salon.id)
        .bind(salon.owner_id)
        .bind(&salon.name)
        .bind(&salon.address)
        .bind(salon.latitude)
        .bind(salon.longitude)
        .bind(salon.utc_offset_minutes)
        .bind(&salon.working_hours)
        .bind(salon.verified)
        .bind(salon.is_active)
        .bind(salon.created_at)
        .bind(salon.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create salon", e))
    }

    async fn find_salon(&self, id: Uuid) -> AppResult<Option<Salon>> {
        sqlx::query_as::<_, Salon>("SELECT * FROM salons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to find salon", e))
    }

    async fn insert_barber(&self, barber: &Barber) -> AppResult<Barber> {
        sqlx::query_as::<_, Barber>(
            "INSERT INTO barbers (id, salon_id, user_id, name, working_hours, is_active, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(barber.id)
        .bind(barber.salon_id)
        .bind(barber.user_id)
        .bind(&barber.name)
        .bind(&barber.working_hours)
        .bind(barber.is_active)
        .bind(barber.created_at)
        .bind(barber.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create barber", e))
    }

    async fn find_barber(&self, id: Uuid) -> AppResult<Option<Barber>> {
        sqlx::query_as::<_, Barber>("SELECT * FROM barbers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to find barber", e))
    }

    async fn find_barber_for_user(&self, user_id: Uuid) -> AppResult<Option<Barber>> {
        sqlx::query_as::<_, Barber>(
            "SELECT * FROM barbers WHERE user_id = $1 OR id = $1 \
             ORDER BY (user_id = $1) DESC NULLS LAST LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to find barber for user", e))
    }

    async fn list_barbers(&self, salon_id: Uuid) -> AppResult<Vec<Barber>> {
        sqlx::query_as::<_, Barber>(
            "SELECT * FROM barbers WHERE salon_id = $1 ORDER BY created_at ASC",
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to list barbers", e))
    }

    async fn set_barber_hours(
        &self,
        barber_id: Uuid,
        hours: Option<WeeklyHours>,
    ) -> AppResult<Option<Barber>> {
        sqlx::query_as::<_, Barber>(
            "UPDATE barbers SET working_hours = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(barber_id)
        .bind(hours.map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to update barber hours", e))
    }

    async fn insert_service(&self, service: &Service) -> AppResult<Service> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, salon_id, title, description, duration_minutes, price, \
             category, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(service.id)
        .bind(service.salon_id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.duration_minutes)
        .bind(service.price)
        .bind(&service.category)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to create service", e))
    }

    async fn find_service(&self, id: Uuid) -> AppResult<Option<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("Failed to find service", e))
    }

    async fn list_services(&self, salon_id: Uuid) -> AppResult<Vec<Service>> {
        sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE salon_id = $1 ORDER BY created_at ASC",
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to list services", e))
    }

    async fn update_service(&self, service: &Service) -> AppResult<Service> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET title = $2, description = $3, duration_minutes = $4, \
             price = $5, category = $6, is_active = $7, updated_at = $8 \
             WHERE id = $1 RETURNING *",
        )
        .bind(service.id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.duration_minutes)
        .bind(service.price)
        .bind(&service.category)
        .bind(service.is_active)
        .bind(service.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_sqlx("Failed to update service", e))?
        .ok_or_else(|| AppError::not_found("Service not found"))
    }
}
