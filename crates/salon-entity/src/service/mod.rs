//! Salon service (catalog item) entities.

pub mod model;

pub use model::{
    CreateService, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, Service, UpdateService,
};
