use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Settings for the PostgreSQL connection pools. Every database gets its own
/// pool built from the same settings.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct PoolSettings {
    /// maximum number of pool connections
    #[arg(long, env = "GEO_REST_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
    /// timeout for acquiring a connection from the pool (seconds)
    #[arg(long, env = "GEO_REST_POOL_TIMEOUT", default_value_t = 30)]
    pub pool_timeout: u64,
    /// idle timeout for releasing a connection from the pool (seconds)
    #[arg(long, env = "GEO_REST_IDLE_TIMEOUT")]
    pub idle_timeout: Option<u64>,
}

impl Default for PoolSettings {
    fn default() -> PoolSettings {
        PoolSettings {
            max_connections: 5,
            pool_timeout: 30,
            idle_timeout: None,
        }
    }
}

impl PoolSettings {
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.pool_timeout))
            .idle_timeout(self.idle_timeout.map(Duration::from_secs))
    }
}
