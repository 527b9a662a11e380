//! Server implementation
//!
//! HTTP server startup, background task wiring and graceful shutdown.

use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::{BackgroundTasks, Config, ServerState, TaskKind};
use crate::scheduler::AutoAssignScheduler;

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create a server around existing state, e.g. pre-seeded for tests.
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };

        let mut tasks = BackgroundTasks::new();
        let scheduler = AutoAssignScheduler::new(
            state.ctx.clone(),
            Duration::from_secs(self.config.auto_assign_interval_secs),
            self.config.auto_assign_max_orders,
            tasks.shutdown_token(),
        );
        tasks.spawn("auto_assign_scheduler", TaskKind::Periodic, async move {
            scheduler.run().await;
        });

        let app = api::build_router()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Order server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        tasks.shutdown().await;
        Ok(())
    }
}
