//! Authentication and authorization
//!
//! - [`JwtService`] - token issuing and validation
//! - [`CurrentActor`] - per-request identity extractor
//! - [`policy`] - role-scoped authorization rules

pub mod extractor;
pub mod jwt;
pub mod policy;

pub use extractor::CurrentActor;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use std::fmt;

use crate::domain::StaffRole;

/// Caller role carried in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Kitchen,
    Courier,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Kitchen => "Kitchen",
            Role::Courier => "Courier",
            Role::Admin => "Admin",
        }
    }

    /// Case-insensitive parse of a role name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "customer" => Some(Role::Customer),
            "kitchen" => Some(Role::Kitchen),
            "courier" => Some(Role::Courier),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl From<StaffRole> for Role {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Kitchen => Role::Kitchen,
            StaffRole::Delivery => Role::Courier,
            StaffRole::Admin => Role::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("courier"), Some(Role::Courier));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("chef"), None);
    }

    #[test]
    fn test_delivery_staff_maps_to_courier() {
        assert_eq!(Role::from(StaffRole::Delivery), Role::Courier);
        assert_eq!(Role::from(StaffRole::Kitchen), Role::Kitchen);
    }
}
