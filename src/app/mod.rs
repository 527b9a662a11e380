//! Application layer
//!
//! Use-case functions gating each operation behind the authorization policy
//! and driving the domain aggregates against the store traits. Handlers and
//! the scheduler call into this module only.

pub mod auth;
pub mod menu;
pub mod orders;
pub mod stats;

pub use auth::{LoginRequest, LoginResult};
pub use orders::{AssignedOrder, NewOrderItem, NewOrderRequest};

use std::sync::Arc;

use crate::auth::JwtService;
use crate::eta::{DeliveryEtaEstimator, NoopEstimator};
use crate::store::{CustomerStore, MemoryStore, MenuItemStore, OrderStore, StaffStore, UnitOfWork};

/// Shared collaborators for the use-case functions; cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrderStore>,
    pub menu: Arc<dyn MenuItemStore>,
    pub staff: Arc<dyn StaffStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
    pub eta: Arc<dyn DeliveryEtaEstimator>,
    pub jwt: Arc<JwtService>,
}

impl AppContext {
    /// Context backed by a single in-memory store, without a routing
    /// backend. Used at startup when no external store is configured,
    /// and throughout the tests.
    pub fn in_memory(store: MemoryStore, jwt: Arc<JwtService>) -> Self {
        Self {
            orders: Arc::new(store.clone()),
            menu: Arc::new(store.clone()),
            staff: Arc::new(store.clone()),
            customers: Arc::new(store.clone()),
            unit_of_work: Arc::new(store),
            eta: Arc::new(NoopEstimator),
            jwt,
        }
    }

    pub fn with_estimator(mut self, eta: Arc<dyn DeliveryEtaEstimator>) -> Self {
        self.eta = eta;
        self
    }
}

#[cfg(test)]
pub(crate) fn test_context(store: MemoryStore) -> AppContext {
    use crate::auth::JwtConfig;

    let jwt = Arc::new(JwtService::with_config(JwtConfig {
        secret: "test-secret-at-least-thirty-two-bytes-long".to_string(),
        expiration_minutes: 60,
        issuer: "order-server".to_string(),
        audience: "order-clients".to_string(),
    }));
    AppContext::in_memory(store, jwt)
}
