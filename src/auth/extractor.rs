//! Identity extractor
//!
//! Resolves the caller's identity from the Authorization header. A missing
//! header yields an anonymous actor so that public endpoints stay open;
//! protected operations call [`CurrentActor::require`] to reject anonymous
//! callers. A present but invalid or expired token is always an error.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::auth::{JwtError, JwtService, Role};
use crate::core::ServerState;
use crate::utils::AppError;

/// The authenticated (or anonymous) caller for a request.
#[derive(Debug, Clone)]
pub struct CurrentActor {
    pub user_id: Option<Uuid>,
    pub role: Option<Role>,
}

impl CurrentActor {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            role: None,
        }
    }

    pub fn authenticated(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id: Some(user_id),
            role: Some(role),
        }
    }

    /// Reject anonymous callers. `action` names the attempted operation
    /// and ends up in the error message.
    pub fn require(&self, action: &str) -> Result<(Uuid, Role), AppError> {
        match (self.user_id, self.role) {
            (Some(id), Some(role)) => Ok((id, role)),
            _ => Err(AppError::forbidden(format!(
                "Authentication is required to {action}."
            ))),
        }
    }
}

impl FromRequestParts<ServerState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse an actor already resolved for this request
        if let Some(actor) = parts.extensions.get::<CurrentActor>() {
            return Ok(actor.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                let actor = CurrentActor::anonymous();
                parts.extensions.insert(actor.clone());
                return Ok(actor);
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let user_id = Uuid::parse_str(&claims.sub)
                    .map_err(|_| AppError::invalid_token("Malformed subject claim"))?;
                let role = Role::parse(&claims.role)
                    .ok_or_else(|| AppError::invalid_token("Unknown role claim"))?;

                let actor = CurrentActor::authenticated(user_id, role);
                parts.extensions.insert(actor.clone());
                Ok(actor)
            }
            Err(e) => {
                tracing::warn!(error = %e, uri = %parts.uri, "token validation failed");
                match e {
                    JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_anonymous() {
        let err = CurrentActor::anonymous().require("view orders").unwrap_err();
        assert_eq!(
            err,
            AppError::forbidden("Authentication is required to view orders.")
        );
    }

    #[test]
    fn test_require_returns_identity() {
        let id = Uuid::new_v4();
        let actor = CurrentActor::authenticated(id, Role::Kitchen);
        assert_eq!(actor.require("view orders").unwrap(), (id, Role::Kitchen));
    }
}
