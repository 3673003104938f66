//! Barber (staff member) entities.

pub mod model;

pub use model::{Barber, CreateBarber};
