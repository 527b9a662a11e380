//! Unified Error Handling
//!
//! Provides the application-wide error type and response envelope:
//! - [`AppError`] - application error enumeration
//! - [`AppResponse`] - API response structure
//!
//! # Error code table
//!
//! | Code  | Meaning              | HTTP |
//! |-------|----------------------|------|
//! | E0002 | Validation failed    | 400  |
//! | E0003 | Resource not found   | 404  |
//! | E0004 | Resource conflict    | 409  |
//! | E0005 | Business rule        | 422  |
//! | E0007 | Invalid transition   | 422  |
//! | E2001 | Permission denied    | 403  |
//! | E3001 | Not logged in        | 401  |
//! | E3002 | Invalid token        | 401  |
//! | E3003 | Token expired        | 401  |
//! | E9001 | Internal error       | 500  |
//! | E9002 | Storage error        | 500  |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::domain::error::DomainError;
use crate::domain::status::{OrderStatus, OrderType};

/// Unified API response structure
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application-level error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== Authorization errors ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business logic errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot transition a {order_type} order from {from} to {to}")]
    InvalidTransition {
        order_type: OrderType,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System errors ==========
    #[error("Storage error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// ========== Helper constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { code, message } => {
                AppError::Validation(format!("{message} ({code})"))
            }
            DomainError::InvalidTransition {
                order_type,
                from,
                to,
            } => AppError::InvalidTransition {
                order_type,
                from,
                to,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "E3001", "Please login first".to_string())
            }
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "E3003", "Token expired".to_string())
            }
            AppError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, "E3002", msg.clone()),

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            // Invalid status transition (422)
            AppError::InvalidTransition { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0007", self.to_string())
            }

            // Business rule (422)
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }

            // Storage errors (500)
            AppError::Database(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Storage error".to_string(),
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}
