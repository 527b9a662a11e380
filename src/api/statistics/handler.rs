//! Statistics API handlers

use axum::{Json, extract::State};

use crate::app::stats;
use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::domain::OrderStatistics;
use crate::utils::AppResult;

/// GET /api/statistics - aggregate order statistics (admin)
pub async fn get_statistics(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<OrderStatistics>> {
    let statistics = stats::order_statistics(&state.ctx, &actor).await?;
    Ok(Json(statistics))
}
