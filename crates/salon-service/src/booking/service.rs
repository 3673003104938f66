//! Booking reads with role-based visibility.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_core::types::pagination::{PageRequest, PageResponse};
use salon_database::store::{BookingStore, CatalogStore};
use salon_entity::actor::ActorRole;
use salon_entity::booking::{Booking, BookingFilter, BookingStatus};
use salon_entity::salon::{Salon, offset_from_minutes};

use crate::availability::{BarberSchedule, calendar};
use crate::context::RequestContext;
use crate::policy;

/// Filters accepted by [`BookingService::list`].
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    pub barber_id: Option<Uuid>,
    pub salon_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    /// Salon-local date of the appointment start.
    pub date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

#[derive(Clone)]
pub struct BookingService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(catalog: Arc<dyn CatalogStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { catalog, bookings }
    }

    /// Fetch one booking visible to the actor.
    pub async fn get(&self, ctx: &RequestContext, booking_id: Uuid) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;
        let schedule = BarberSchedule::load(self.catalog.as_ref(), booking.barber_id).await?;
        if !policy::can_view_booking(ctx, &booking, &schedule.salon, &schedule.barber) {
            return Err(AppError::authorization("You cannot view this booking"));
        }
        Ok(booking)
    }

    /// List bookings, narrowed to what the actor may see: clients their
    /// own, barbers their calendar, owners their salon.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: BookingQuery,
        page: PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let mut filter = BookingFilter {
            client_id: query.client_id,
            barber_id: query.barber_id,
            salon_id: query.salon_id,
            status: query.status,
            ..Default::default()
        };

        let barber = match query.barber_id {
            Some(id) => Some(BarberSchedule::load(self.catalog.as_ref(), id).await?),
            None => None,
        };
        let salon = match (query.salon_id, &barber) {
            (Some(id), _) => Some(self.find_salon(id).await?),
            (None, Some(schedule)) => Some(schedule.salon.clone()),
            (None, None) => None,
        };

        match ctx.role {
            ActorRole::Client => {
                if query.client_id.is_some_and(|id| id != ctx.actor_id) {
                    return Err(AppError::authorization("Clients may only list their own bookings"));
                }
                filter.client_id = Some(ctx.actor_id);
            }
            ActorRole::Barber => {
                let own = match barber.as_ref() {
                    Some(schedule) => Some(schedule.barber.clone()),
                    None => self.catalog.find_barber_for_user(ctx.actor_id).await?,
                };
                match own {
                    Some(own) if own.is_user(ctx.actor_id) => filter.barber_id = Some(own.id),
                    _ => {
                        return Err(AppError::authorization(
                            "Barbers may only list their own bookings",
                        ));
                    }
                }
            }
            ActorRole::Owner => {
                let Some(salon) = salon.as_ref() else {
                    return Err(AppError::validation("salonId or barberId is required"));
                };
                if !policy::can_manage_salon(ctx, salon) {
                    return Err(AppError::authorization(
                        "Owners may only list their own salon's bookings",
                    ));
                }
                filter.salon_id = Some(salon.id);
            }
            ActorRole::Admin | ActorRole::Superadmin => {}
        }

        if let Some(date) = query.date {
            let offset = salon
                .as_ref()
                .map(Salon::offset)
                .unwrap_or_else(|| offset_from_minutes(0));
            let window = calendar::day_window(date, offset);
            filter.from = Some(window.start);
            filter.to = Some(window.end);
        }

        self.bookings.list_bookings(&filter, &page).await
    }

    async fn find_salon(&self, id: Uuid) -> AppResult<Salon> {
        self.catalog
            .find_salon(id)
            .await?
            .ok_or_else(|| AppError::not_found("Salon not found"))
    }
}
