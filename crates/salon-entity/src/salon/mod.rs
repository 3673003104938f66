//! Salon domain entities.

pub mod hours;
pub mod model;

pub use hours::{DayHours, HoursWindow, WeeklyHours};
pub use model::{CreateSalon, Salon, offset_from_minutes};
