//! Domain error kinds
//!
//! Invariant violations are reported as tagged values, not a panic or an
//! exception hierarchy. Every validation failure carries a stable
//! machine-readable code (e.g. `Order.MissingAssignment`) alongside the
//! human-readable message so callers can pattern-match without string
//! comparison.

use thiserror::Error;

use super::status::{OrderStatus, OrderType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
    },

    #[error("cannot transition a {order_type} order from {from} to {to}")]
    InvalidTransition {
        order_type: OrderType,
        from: OrderStatus,
        to: OrderStatus,
    },
}

impl DomainError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            Self::Validation { code, .. } => code,
            Self::InvalidTransition { .. } => "Order.InvalidTransition",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
