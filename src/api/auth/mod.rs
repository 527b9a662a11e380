//! Auth API module
//!
//! | Path            | Method | Auth |
//! |-----------------|--------|------|
//! | /api/auth/login | POST   | none |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/auth/login", post(handler::login))
}
