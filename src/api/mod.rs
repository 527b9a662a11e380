//! API routing
//!
//! - [`health`] - liveness check
//! - [`auth`] - login
//! - [`menu`] - menu browsing and admin CRUD
//! - [`orders`] - order placement and lifecycle
//! - [`statistics`] - admin statistics

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod statistics;

use axum::Router;

use crate::core::ServerState;

pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(statistics::router())
}
