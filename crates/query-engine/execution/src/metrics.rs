//! Metrics setup and update for the server.

use prometheus::{IntCounterVec, IntGaugeVec, Opts, Registry};

#[derive(Debug, Clone)]
pub struct Metrics {
    /// Successful requests, by action.
    pub request_total: IntCounterVec,
    /// Failed requests, by error kind.
    pub error_total: IntCounterVec,
    pub pool_size: IntGaugeVec,
    pub pool_idle_count: IntGaugeVec,
    pub pool_max_connections: IntGaugeVec,
}

/// Create a new int counter metric with labels and register it with the provided Prometheus Registry
fn add_int_counter_vec_metric(
    metrics_registry: &Registry,
    metric_name: &str,
    metric_description: &str,
    labels: &[&str],
) -> Result<IntCounterVec, prometheus::Error> {
    let int_counter = IntCounterVec::new(Opts::new(metric_name, metric_description), labels)?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new int gauge metric with labels and register it with the provided Prometheus Registry
fn add_int_gauge_vec_metric(
    metrics_registry: &Registry,
    metric_name: &str,
    metric_description: &str,
    labels: &[&str],
) -> Result<IntGaugeVec, prometheus::Error> {
    let int_gauge = IntGaugeVec::new(Opts::new(metric_name, metric_description), labels)?;
    metrics_registry.register(Box::new(int_gauge.clone()))?;
    Ok(int_gauge)
}

/// Setup counters and gauges used to produce Prometheus metrics
pub fn initialise_metrics(metrics_registry: &Registry) -> Result<Metrics, prometheus::Error> {
    let request_total = add_int_counter_vec_metric(
        metrics_registry,
        "geo_rest_request_total",
        "Total successful requests.",
        &["action"],
    )?;

    let error_total = add_int_counter_vec_metric(
        metrics_registry,
        "geo_rest_error_total",
        "Total failed requests.",
        &["kind"],
    )?;

    let pool_size = add_int_gauge_vec_metric(
        metrics_registry,
        "geo_rest_pool_size",
        "The number of connections currently active. This includes idle connections.",
        &["database"],
    )?;

    let pool_idle_count = add_int_gauge_vec_metric(
        metrics_registry,
        "geo_rest_pool_idle",
        "The number of connections active and idle (not in use).",
        &["database"],
    )?;

    let pool_max_connections = add_int_gauge_vec_metric(
        metrics_registry,
        "geo_rest_pool_max_connections",
        "The maximum number of connections that this pool should maintain.",
        &["database"],
    )?;

    Ok(Metrics {
        request_total,
        error_total,
        pool_size,
        pool_idle_count,
        pool_max_connections,
    })
}

impl Metrics {
    pub fn record_request(&self, action: &str) {
        self.request_total.with_label_values(&[action]).inc();
    }

    pub fn record_error(&self, kind: &str) {
        self.error_total.with_label_values(&[kind]).inc();
    }

    /// Update the gauges of one database's connection pool.
    pub fn update_pool_metrics(&self, database: &str, pool: &sqlx::PgPool) {
        let pool_size: i64 = pool.size().into();
        self.pool_size.with_label_values(&[database]).set(pool_size);

        let pool_idle = i64::try_from(pool.num_idle()).unwrap_or(i64::MAX);
        self.pool_idle_count
            .with_label_values(&[database])
            .set(pool_idle);

        let max_connections: i64 = pool.options().get_max_connections().into();
        self.pool_max_connections
            .with_label_values(&[database])
            .set(max_connections);
    }

    /// Drop the gauges of a database whose pool is gone.
    pub fn remove_pool_metrics(&self, database: &str) {
        for gauge in [
            &self.pool_size,
            &self.pool_idle_count,
            &self.pool_max_connections,
        ] {
            // absent when the pool never served a request
            let _ = gauge.remove_label_values(&[database]);
        }
    }
}
