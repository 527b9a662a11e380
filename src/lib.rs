//! Order Server - restaurant order-management backend
//!
//! Customers place pickup or delivery orders against a menu, kitchen staff
//! prepare them, couriers deliver them, and an admin watches aggregate
//! statistics. A periodic scheduler distributes unassigned delivery orders
//! round-robin across the couriers on shift.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/       # configuration, state, server, background tasks
//! ├── domain/     # order aggregate, transition rules, statistics
//! ├── auth/       # JWT, identity extraction, authorization policy
//! ├── app/        # use-case functions
//! ├── store/      # store traits and the in-memory implementation
//! ├── eta/        # delivery travel-time estimation
//! ├── scheduler/  # auto-assignment loop
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # errors, logging, validation
//! ```

pub mod api;
pub mod app;
pub mod auth;
pub mod core;
pub mod domain;
pub mod eta;
pub mod scheduler;
pub mod store;
pub mod utils;

pub use auth::{CurrentActor, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use domain::{Order, OrderStatus, OrderType};
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Environment setup: dotenv and logging. Call once at startup before
/// loading [`Config`].
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
