//! Catalog service: salons, their barbers and their services.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_database::store::CatalogStore;
use salon_entity::Json;
use salon_entity::actor::ActorRole;
use salon_entity::barber::{Barber, CreateBarber};
use salon_entity::salon::{CreateSalon, Salon, WeeklyHours};
use salon_entity::service::{
    CreateService, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, Service, UpdateService,
};

use crate::availability::{BarberSchedule, SlotCache};
use crate::context::RequestContext;
use crate::policy;

/// Largest UTC offset in minutes (UTC+14:00).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    slot_cache: SlotCache,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>, slot_cache: SlotCache) -> Self {
        Self {
            catalog,
            slot_cache,
        }
    }

    /// Register a salon. Owners register salons for themselves; admins
    /// on behalf of any owner.
    pub async fn create_salon(&self, ctx: &RequestContext, data: CreateSalon) -> AppResult<Salon> {
        match ctx.role {
            ActorRole::Owner if data.owner_id == ctx.actor_id => {}
            _ if ctx.is_admin() => {}
            _ => {
                return Err(AppError::authorization(
                    "Only owners (for themselves) and admins may create salons",
                ));
            }
        }
        require_text("name", &data.name)?;
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&data.utc_offset_minutes) {
            return Err(AppError::validation("utcOffsetMinutes must be within -840..=840"));
        }
        data.working_hours.validate()?;

        let now = Utc::now();
        let salon = Salon {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            name: data.name.trim().to_string(),
            address: data.address,
            latitude: data.latitude,
            longitude: data.longitude,
            utc_offset_minutes: data.utc_offset_minutes,
            working_hours: Json(data.working_hours),
            verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let salon = self.catalog.insert_salon(&salon).await?;

        info!(salon_id = %salon.id, owner_id = %salon.owner_id, "Salon created");
        Ok(salon)
    }

    pub async fn get_salon(&self, salon_id: Uuid) -> AppResult<Salon> {
        self.catalog
            .find_salon(salon_id)
            .await?
            .ok_or_else(|| AppError::not_found("Salon not found"))
    }

    pub async fn create_barber(
        &self,
        ctx: &RequestContext,
        data: CreateBarber,
    ) -> AppResult<Barber> {
        let salon = self.get_salon(data.salon_id).await?;
        if !policy::can_manage_salon(ctx, &salon) {
            return Err(AppError::authorization("Only the salon's owner may add barbers"));
        }
        require_text("name", &data.name)?;
        if let Some(hours) = &data.working_hours {
            hours.validate()?;
        }

        let now = Utc::now();
        let barber = Barber {
            id: Uuid::new_v4(),
            salon_id: salon.id,
            user_id: data.user_id,
            name: data.name.trim().to_string(),
            working_hours: data.working_hours.map(Json),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let barber = self.catalog.insert_barber(&barber).await?;

        info!(barber_id = %barber.id, salon_id = %salon.id, "Barber added");
        Ok(barber)
    }

    pub async fn list_barbers(&self, salon_id: Uuid) -> AppResult<Vec<Barber>> {
        self.get_salon(salon_id).await?;
        self.catalog.list_barbers(salon_id).await
    }

    /// Replace a barber's weekly hours; `None` reverts to the salon's.
    pub async fn set_barber_hours(
        &self,
        ctx: &RequestContext,
        barber_id: Uuid,
        hours: Option<WeeklyHours>,
    ) -> AppResult<Barber> {
        let schedule = BarberSchedule::load(self.catalog.as_ref(), barber_id).await?;
        if !policy::can_manage_calendar(ctx, &schedule.salon, &schedule.barber) {
            return Err(AppError::authorization(
                "Only the barber or the salon's managers may change these hours",
            ));
        }
        if let Some(hours) = &hours {
            hours.validate()?;
        }

        let follows_salon = hours.is_none();
        let barber = self
            .catalog
            .set_barber_hours(barber_id, hours)
            .await?
            .ok_or_else(|| AppError::not_found("Barber not found"))?;
        self.slot_cache.invalidate_barber(barber_id).await;

        info!(barber_id = %barber_id, follows_salon, "Barber hours updated");
        Ok(barber)
    }

    pub async fn create_service(
        &self,
        ctx: &RequestContext,
        data: CreateService,
    ) -> AppResult<Service> {
        let salon = self.get_salon(data.salon_id).await?;
        if !policy::can_manage_salon(ctx, &salon) {
            return Err(AppError::authorization("Only the salon's owner may add services"));
        }

        let now = Utc::now();
        let service = Service {
            id: Uuid::new_v4(),
            salon_id: salon.id,
            title: data.title.trim().to_string(),
            description: data.description,
            duration_minutes: data.duration_minutes,
            price: data.price,
            category: data.category,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        validate_service(&service)?;
        let service = self.catalog.insert_service(&service).await?;

        info!(
            service_id = %service.id,
            salon_id = %salon.id,
            duration_minutes = service.duration_minutes,
            "Service created"
        );
        Ok(service)
    }

    pub async fn list_services(&self, salon_id: Uuid) -> AppResult<Vec<Service>> {
        self.get_salon(salon_id).await?;
        self.catalog.list_services(salon_id).await
    }

    /// Edit a service. Existing bookings keep the duration and price they
    /// were made with.
    pub async fn update_service(
        &self,
        ctx: &RequestContext,
        service_id: Uuid,
        update: UpdateService,
    ) -> AppResult<Service> {
        let mut service = self
            .catalog
            .find_service(service_id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))?;
        let salon = self.get_salon(service.salon_id).await?;
        if !policy::can_manage_salon(ctx, &salon) {
            return Err(AppError::authorization("Only the salon's owner may edit services"));
        }

        update.apply(&mut service);
        validate_service(&service)?;
        let service = self.catalog.update_service(&service).await?;
        self.slot_cache.invalidate_all().await;

        info!(service_id = %service_id, "Service updated");
        Ok(service)
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_service(service: &Service) -> AppResult<()> {
    require_text("title", &service.title)?;
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&service.duration_minutes) {
        return Err(AppError::validation(format!(
            "durationMinutes must be within {MIN_DURATION_MINUTES}..={MAX_DURATION_MINUTES}"
        )));
    }
    if service.price < 0 {
        return Err(AppError::validation("price must not be negative"));
    }
    Ok(())
}
