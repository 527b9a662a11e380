//! Menu API module
//!
//! | Path           | Method | Auth  |
//! |----------------|--------|-------|
//! | /api/menu      | GET    | none  |
//! | /api/menu      | POST   | admin |
//! | /api/menu/{id} | GET    | none  |
//! | /api/menu/{id} | PUT    | admin |
//! | /api/menu/{id} | DELETE | admin |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
