//! Statistics API module
//!
//! | Path            | Method | Auth  |
//! |-----------------|--------|-------|
//! | /api/statistics | GET    | admin |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/statistics", get(handler::get_statistics))
}
