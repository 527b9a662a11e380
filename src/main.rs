use order_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Order server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Shared state (stores, token service, estimator)
    let state = ServerState::initialize(&config);

    // 4. HTTP server; Server::run starts the scheduler as well
    let server = Server::with_state(config, state);
    server.run().await
}
