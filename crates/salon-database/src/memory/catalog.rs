//! In-memory catalog store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sqlx::types::Json;
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_entity::barber::Barber;
use salon_entity::salon::{Salon, WeeklyHours};
use salon_entity::service::Service;

use crate::store::CatalogStore;

/// Catalog kept in concurrent maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    salons: Arc<DashMap<Uuid, Salon>>,
    barbers: Arc<DashMap<Uuid, Barber>>,
    services: Arc<DashMap<Uuid, Service>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn insert_salon(&self, salon: &Salon) -> AppResult<Salon> {
        self.salons.insert(salon.id, salon.clone());
        Ok(salon.clone())
    }

    async fn find_salon(&self, id: Uuid) -> AppResult<Option<Salon>> {
        Ok(self.salons.get(&id).map(|s| s.clone()))
    }

    async fn insert_barber(&self, barber: &Barber) -> AppResult<Barber> {
        if !self.salons.contains_key(&barber.salon_id) {
            return Err(AppError::not_found("Salon not found"));
        }
        self.barbers.insert(barber.id, barber.clone());
        Ok(barber.clone())
    }

    async fn find_barber(&self, id: Uuid) -> AppResult<Option<Barber>> {
        Ok(self.barbers.get(&id).map(|b| b.clone()))
    }

    async fn find_barber_for_user(&self, user_id: Uuid) -> AppResult<Option<Barber>> {
        Ok(self
            .barbers
            .iter()
            .find(|b| b.is_user(user_id))
            .map(|b| b.clone()))
    }

    async fn list_barbers(&self, salon_id: Uuid) -> AppResult<Vec<Barber>> {
        let mut barbers: Vec<Barber> = self
            .barbers
            .iter()
            .filter(|b| b.salon_id == salon_id)
            .map(|b| b.clone())
            .collect();
        barbers.sort_by_key(|b| b.created_at);
        Ok(barbers)
    }

    async fn set_barber_hours(
        &self,
        barber_id: Uuid,
        hours: Option<WeeklyHours>,
    ) -> AppResult<Option<Barber>> {
        Ok(self.barbers.get_mut(&barber_id).map(|mut barber| {
            barber.working_hours = hours.map(Json);
            barber.updated_at = Utc::now();
            barber.clone()
        }))
    }

    async fn insert_service(&self, service: &Service) -> AppResult<Service> {
        if !self.salons.contains_key(&service.salon_id) {
            return Err(AppError::not_found("Salon not found"));
        }
        self.services.insert(service.id, service.clone());
        Ok(service.clone())
    }

    async fn find_service(&self, id: Uuid) -> AppResult<Option<Service>> {
        Ok(self.services.get(&id).map(|s| s.clone()))
    }

    async fn list_services(&self, salon_id: Uuid) -> AppResult<Vec<Service>> {
        let mut services: Vec<Service> = self
            .services
            .iter()
            .filter(|s| s.salon_id == salon_id)
            .map(|s| s.clone())
            .collect();
        services.sort_by_key(|s| s.created_at);
        Ok(services)
    }

    async fn update_service(&self, service: &Service) -> AppResult<Service> {
        match self.services.get_mut(&service.id) {
            Some(mut existing) => {
                *existing = service.clone();
                Ok(service.clone())
            }
            None => Err(AppError::not_found("Service not found")),
        }
    }
}
