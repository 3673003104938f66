//! # salon-database
//!
//! PostgreSQL connection management, migrations, and the storage seams the
//! booking engine runs against. Each store trait has a PostgreSQL
//! implementation and an in-memory one for single-process deployments and
//! tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BarberDay, BarberDayTx, BookingStore, CatalogStore};
