//! Roles of the callers acting on salons and bookings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role forwarded by the gateway with each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// Books appointments for themselves.
    Client,
    /// Staff member with a calendar.
    Barber,
    /// Owns one or more salons.
    Owner,
    /// Platform administrator.
    Admin,
    /// Platform administrator with full access.
    Superadmin,
}

impl ActorRole {
    /// Whether this role bypasses ownership checks.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Barber => "barber",
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "barber" => Ok(Self::Barber),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Owner".parse::<ActorRole>(), Ok(ActorRole::Owner));
        assert_eq!("SUPERADMIN".parse::<ActorRole>(), Ok(ActorRole::Superadmin));
        assert!("stylist".parse::<ActorRole>().is_err());
    }

    #[test]
    fn test_admin_roles() {
        assert!(ActorRole::Admin.is_admin());
        assert!(ActorRole::Superadmin.is_admin());
        assert!(!ActorRole::Owner.is_admin());
    }
}
