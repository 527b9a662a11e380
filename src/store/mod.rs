//! Store Module
//!
//! Abstract access to the backing store. The domain and application layers
//! only ever see these traits; the concrete persistence engine is an external
//! collaborator. Writes are staged through `add`/`update`/`delete` and become
//! visible once [`UnitOfWork::commit`] applies them.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{MenuItem, Order, OrderFilter, Staff};
use crate::utils::AppError;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Duplicate(msg) => AppError::Conflict(msg),
            StoreError::Storage(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Order access.
///
/// `get_by_filter` and `pending_assignment` return orders ordered by creation
/// time ascending (oldest first).
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Order>>;

    async fn get_by_filter(
        &self,
        filter: &OrderFilter,
        max_results: Option<usize>,
    ) -> StoreResult<Vec<Order>>;

    /// Delivery orders without an assignment in an assignable status
    /// (Pending or ReadyForDelivery), capped at `max`.
    async fn pending_assignment(&self, max: usize) -> StoreResult<Vec<Order>>;

    /// Stage a new order for the next commit.
    async fn add(&self, order: Order) -> StoreResult<()>;

    /// Stage an update to an existing order for the next commit.
    async fn update(&self, order: Order) -> StoreResult<()>;
}

#[async_trait]
pub trait MenuItemStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<MenuItem>>;

    async fn get_all(&self) -> StoreResult<Vec<MenuItem>>;

    async fn add(&self, item: MenuItem) -> StoreResult<()>;

    async fn update(&self, item: MenuItem) -> StoreResult<()>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait StaffStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Staff>>;

    /// Active staff with the Delivery role.
    async fn get_available_couriers(&self) -> StoreResult<Vec<Staff>>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn exists(&self, id: Uuid) -> StoreResult<bool>;
}

/// Applies all staged changes atomically and reports how many rows changed.
///
/// The staging buffer is shared per store, not per request: a commit flushes
/// everything staged on the store so far, including writes staged by other
/// in-flight operations.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn commit(&self) -> StoreResult<usize>;
}
