//! Transient state used by the server.
//!
//! This is initialized on startup. Connection pools are created lazily, one per
//! database, the first time a request names that database.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info_span, Instrument};

use geo_rest_configuration::{ConnectionSettings, PoolSettings};
use query_engine_execution::metrics;

/// State for our server.
#[derive(Clone)]
pub struct ServerState {
    pub connection_settings: Arc<ConnectionSettings>,
    pub pool_settings: Arc<PoolSettings>,
    pub pools: Arc<RwLock<HashMap<String, sqlx::PgPool>>>,
    pub metrics: metrics::Metrics,
    pub metrics_registry: prometheus::Registry,
}

/// Set up metrics and wrap the settings inside a server state.
pub async fn create_state(
    connection_settings: ConnectionSettings,
    pool_settings: PoolSettings,
    metrics_registry: prometheus::Registry,
) -> Result<ServerState, InitializationError> {
    let metrics = async {
        metrics::initialise_metrics(&metrics_registry).map_err(InitializationError::MetricsError)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    Ok(ServerState {
        connection_settings: Arc::new(connection_settings),
        pool_settings: Arc::new(pool_settings),
        pools: Arc::default(),
        metrics,
        metrics_registry,
    })
}

impl ServerState {
    /// The schema the served tables live in.
    pub fn schema(&self) -> &str {
        &self.connection_settings.schema
    }

    /// The connection pool of a database, created on first use. Connections
    /// are only opened when a statement needs one.
    pub async fn pool(&self, database: &str) -> sqlx::PgPool {
        if let Some(pool) = self.pools.read().await.get(database) {
            return pool.clone();
        }

        let mut pools = self.pools.write().await;
        pools
            .entry(database.to_string())
            .or_insert_with(|| {
                tracing::info!(database, "creating connection pool");
                self.pool_settings
                    .pool_options()
                    .connect_lazy_with(self.connection_settings.connect_options(database))
            })
            .clone()
    }

    /// Drop the pool of a database that could not be reached, along with its
    /// gauges, so that names of missing databases are not kept around.
    pub async fn forget_pool(&self, database: &str) {
        if self.pools.write().await.remove(database).is_some() {
            tracing::info!(database, "dropping connection pool");
        }
        self.metrics.remove_pool_metrics(database);
    }
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
