//! Shared utilities: errors, result alias, logging, validation helpers.

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use result::AppResult;
