use axum_test_helper::TestClient;

use geo_rest::{create_router, create_state};
use geo_rest_configuration::{ConnectionSettings, PoolSettings, DEFAULT_SCHEMA};

/// The database the ignored tests run against. It holds the `places` table
/// with a `the_geom` geometry column.
pub const TEST_DATABASE: &str = "geo_rest_test";

/// Connection settings for a local PostGIS server.
pub fn connection_settings() -> ConnectionSettings {
    ConnectionSettings {
        host: "localhost".to_string(),
        port: 5432,
        username: Some("postgres".to_string()),
        password: Some("password".into()),
        schema: DEFAULT_SCHEMA.to_string(),
    }
}

/// Settings that point at a port nothing listens on, with a short acquire
/// timeout.
pub fn unreachable_settings() -> (ConnectionSettings, PoolSettings) {
    let connection = ConnectionSettings {
        port: 1,
        ..connection_settings()
    };
    let pool = PoolSettings {
        pool_timeout: 1,
        ..PoolSettings::default()
    };
    (connection, pool)
}

/// A client for a fresh server. Pools are lazy, so no database is contacted
/// until a request needs one.
pub async fn create_client() -> TestClient {
    let _ = env_logger::builder().is_test(true).try_init();

    let state = create_state(
        connection_settings(),
        PoolSettings::default(),
        prometheus::Registry::new(),
    )
    .await
    .unwrap();

    TestClient::new(create_router(state))
}
