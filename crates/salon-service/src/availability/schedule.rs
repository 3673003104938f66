//! A barber together with the salon whose clock and hours govern them.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use uuid::Uuid;

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_database::store::{BarberDay, CatalogStore};
use salon_entity::barber::Barber;
use salon_entity::salon::{DayHours, Salon};

use super::calendar;

#[derive(Debug, Clone)]
pub struct BarberSchedule {
    pub barber: Barber,
    pub salon: Salon,
}

impl BarberSchedule {
    /// Load a barber and their salon; either missing is `NotFound`.
    pub async fn load(catalog: &dyn CatalogStore, barber_id: Uuid) -> AppResult<Self> {
        let barber = catalog
            .find_barber(barber_id)
            .await?
            .ok_or_else(|| AppError::not_found("Barber not found"))?;
        let salon = catalog
            .find_salon(barber.salon_id)
            .await?
            .ok_or_else(|| AppError::not_found("Salon not found"))?;
        Ok(Self { barber, salon })
    }

    pub fn offset(&self) -> FixedOffset {
        self.salon.offset()
    }

    /// Whether the barber can currently take bookings.
    pub fn is_bookable(&self) -> bool {
        self.barber.is_active && self.salon.is_active
    }

    /// The barber's hours on `date`, falling back to the salon's.
    pub fn hours_on(&self, date: NaiveDate) -> DayHours {
        self.barber
            .effective_hours(&self.salon.working_hours)
            .for_weekday(date.weekday())
            .clone()
    }

    /// The salon-local date of an instant.
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        calendar::local_date(at, self.offset())
    }

    /// The serialization unit for `date`.
    pub fn day(&self, date: NaiveDate) -> BarberDay {
        BarberDay::new(
            self.barber.id,
            date,
            calendar::day_window(date, self.offset()),
        )
    }
}
