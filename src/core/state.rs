//! Server state
//!
//! Clone-able bundle of shared services handed to every request handler.

use std::sync::Arc;

use crate::app::AppContext;
use crate::auth::JwtService;
use crate::core::Config;
use crate::domain::{Staff, StaffRole};
use crate::eta::{OpenRouteServiceConfig, OpenRouteServiceEstimator};
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    /// Application-layer collaborators (stores, estimator, token service)
    pub ctx: AppContext,
    pub jwt_service: Arc<JwtService>,
    /// The backing store, kept for seeding and diagnostics
    pub store: MemoryStore,
}

impl ServerState {
    /// Build the shared state: store, token service, ETA estimator and the
    /// application context. Seeds a default admin account the first time
    /// the server starts with an empty staff table.
    pub fn initialize(config: &Config) -> Self {
        let store = MemoryStore::new();
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let mut ctx = AppContext::in_memory(store.clone(), jwt_service.clone());
        match OpenRouteServiceConfig::from_env() {
            Some(ors) => {
                tracing::info!(profile = %ors.profile, "OpenRouteService estimator enabled");
                ctx = ctx.with_estimator(Arc::new(OpenRouteServiceEstimator::new(ors)));
            }
            None => {
                tracing::info!("No routing backend configured, orders get no delivery estimate");
            }
        }

        let state = Self {
            config: Arc::new(config.clone()),
            ctx,
            jwt_service,
            store,
        };
        state.seed_default_admin();
        state
    }

    /// Without at least one admin account nothing can be administered, so
    /// an empty staff table gets one. The id is logged for the first login.
    fn seed_default_admin(&self) {
        if self.store.staff_count() > 0 {
            return;
        }
        match Staff::create("Administrator", StaffRole::Admin, true) {
            Ok(admin) => {
                tracing::info!(staff_id = %admin.id(), "Seeded default admin account");
                self.store.seed_staff(admin);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to seed default admin account");
            }
        }
    }
}
