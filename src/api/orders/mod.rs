//! Orders API module
//!
//! | Path                         | Method | Auth              |
//! |------------------------------|--------|-------------------|
//! | /api/orders                  | POST   | customer          |
//! | /api/orders                  | GET    | any authenticated |
//! | /api/orders/assignments      | GET    | courier           |
//! | /api/orders/{id}             | GET    | any authenticated |
//! | /api/orders/{id}/status      | PATCH  | role-dependent    |
//! | /api/orders/{id}/assignments | POST   | kitchen, admin    |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place).get(handler::list))
        // Must come before /{id} to avoid path conflicts
        .route("/assignments", get(handler::my_deliveries))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/assignments", post(handler::assign_courier))
}
