use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | when set, logs also go to a daily file |
/// | JWT_SECRET | (generated) | token signing secret, min 32 bytes |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | AUTO_ASSIGN_INTERVAL_SECS | 300 | scheduler cadence |
/// | AUTO_ASSIGN_MAX_ORDERS | 5 | max orders per scheduler run |
/// | ORS_API_KEY | (unset) | enables OpenRouteService estimates |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 AUTO_ASSIGN_INTERVAL_SECS=60 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
    /// Seconds between auto-assignment runs
    pub auto_assign_interval_secs: u64,
    /// Max orders handled per auto-assignment run
    pub auto_assign_max_orders: usize,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::default(),
            auto_assign_interval_secs: std::env::var("AUTO_ASSIGN_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(300),
            auto_assign_max_orders: std::env::var("AUTO_ASSIGN_MAX_ORDERS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
