//! Domain layer
//!
//! The order aggregate and its value objects, the status transition rules,
//! menu and staff entities, and the pure filter/statistics engine. Nothing in
//! this module performs IO; all mutation goes through command methods that
//! re-validate invariants and return [`error::DomainError`] on violation.

pub mod assignment;
pub mod customer;
pub mod error;
pub mod filter;
pub mod menu;
pub mod order;
pub mod staff;
pub mod status;

pub use assignment::AssignmentInfo;
pub use customer::Customer;
pub use error::{DomainError, DomainResult};
pub use filter::{OrderFilter, OrderStatistics};
pub use menu::MenuItem;
pub use order::{DeliveryAddress, Order, OrderItem};
pub use staff::{Staff, StaffRole};
pub use status::{OrderStatus, OrderType};
