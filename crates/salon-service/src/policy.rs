//! Ownership rules shared by the services.

use salon_core::error::AppError;
use salon_core::result::AppResult;
use salon_entity::actor::ActorRole;
use salon_entity::barber::Barber;
use salon_entity::booking::{Booking, BookingStatus};
use salon_entity::salon::Salon;

use crate::context::RequestContext;

/// Admins anywhere, owners on their own salon.
pub fn can_manage_salon(ctx: &RequestContext, salon: &Salon) -> bool {
    ctx.is_admin() || (ctx.role == ActorRole::Owner && salon.owner_id == ctx.actor_id)
}

/// Salon managers, plus the barber on their own calendar.
pub fn can_manage_calendar(ctx: &RequestContext, salon: &Salon, barber: &Barber) -> bool {
    can_manage_salon(ctx, salon) || (ctx.role == ActorRole::Barber && barber.is_user(ctx.actor_id))
}

/// The booking's client, its barber, the salon's managers.
pub fn can_view_booking(
    ctx: &RequestContext,
    booking: &Booking,
    salon: &Salon,
    barber: &Barber,
) -> bool {
    match ctx.role {
        ActorRole::Client => booking.client_id == ctx.actor_id,
        _ => can_manage_calendar(ctx, salon, barber),
    }
}

/// Clients may only cancel their own bookings; everyone who manages the
/// calendar may apply any transition.
pub fn ensure_can_transition(
    ctx: &RequestContext,
    booking: &Booking,
    salon: &Salon,
    barber: &Barber,
    next: BookingStatus,
) -> AppResult<()> {
    let allowed = match ctx.role {
        ActorRole::Client => {
            booking.client_id == ctx.actor_id && next == BookingStatus::Cancelled
        }
        _ => can_manage_calendar(ctx, salon, barber),
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "A {} may not set this booking to {next}",
            ctx.role
        )))
    }
}
