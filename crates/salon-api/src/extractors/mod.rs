//! Custom Axum extractors.

pub mod actor;
pub mod json;
pub mod path;
pub mod query;

pub use actor::Actor;
pub use json::ValidJson;
pub use path::ValidPath;
pub use query::ValidQuery;
