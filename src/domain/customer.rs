//! Customer record
//!
//! Customers are existence-checked only; no business logic depends on their
//! attributes beyond identity.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}
