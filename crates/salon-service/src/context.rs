//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salon_entity::actor::ActorRole;

/// Who is acting on the current request.
///
/// Built by the HTTP layer from gateway headers and passed to every
/// mutating service call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub actor_id: Uuid,
    /// The acting user's role.
    pub role: ActorRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(actor_id: Uuid, role: ActorRole) -> Self {
        Self {
            actor_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Whether the actor bypasses ownership checks.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_client(&self) -> bool {
        self.role == ActorRole::Client
    }
}
