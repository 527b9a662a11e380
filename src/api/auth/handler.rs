//! Auth API handlers

use axum::{Json, extract::State};

use crate::app::{self, LoginRequest, LoginResult};
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/auth/login - exchange a user id for an access token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResult>> {
    let result = app::auth::login(&state.ctx, payload).await?;
    Ok(Json(result))
}
