//! Staff entity and roles

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    Kitchen,
    Delivery,
    Admin,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Kitchen => write!(f, "Kitchen"),
            StaffRole::Delivery => write!(f, "Delivery"),
            StaffRole::Admin => write!(f, "Admin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    id: Uuid,
    name: String,
    role: StaffRole,
    is_active: bool,
}

impl Staff {
    pub fn create(name: impl Into<String>, role: StaffRole, is_active: bool) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "Staff.NameRequired",
                "Name is required.",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            role,
            is_active,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> StaffRole {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Active staff with the Delivery role can take courier assignments.
    pub fn is_available_courier(&self) -> bool {
        self.is_active && self.role == StaffRole::Delivery
    }
}
