//! Login use case
//!
//! Existence-based login: the caller names a customer or staff id and gets
//! back a role-bearing access token. There is no credential check, matching
//! the demo-grade account model of the rest of the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Role;
use crate::utils::{AppError, AppResult};

use super::AppContext;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: Uuid,
    pub is_staff: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub role: String,
}

pub async fn login(ctx: &AppContext, request: LoginRequest) -> AppResult<LoginResult> {
    let (user_id, role) = if request.is_staff {
        let staff = ctx
            .staff
            .get_by_id(request.user_id)
            .await?
            .ok_or_else(|| AppError::business_rule("Staff member not found."))?;
        if !staff.is_active() {
            return Err(AppError::business_rule("Staff member is inactive."));
        }
        (staff.id(), Role::from(staff.role()))
    } else {
        if !ctx.customers.exists(request.user_id).await? {
            return Err(AppError::business_rule("Customer not found."));
        }
        (request.user_id, Role::Customer)
    };

    let (access_token, expires_at) = ctx
        .jwt
        .generate_token(&user_id.to_string(), role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = %user_id, role = %role, "login");
    Ok(LoginResult {
        access_token,
        expires_at,
        role: role.as_str().to_string(),
    })
}
