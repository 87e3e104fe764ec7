//! Database connection settings.

use sqlx::postgres::PgConnectOptions;

use crate::values::Secret;

/// The schema tables are looked up in when none is configured.
pub const DEFAULT_SCHEMA: &str = "public";

/// Where and how to connect. The database name is not part of the settings:
/// every request names its own.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct ConnectionSettings {
    #[arg(long = "pg-host", env = "GEO_REST_PG_HOST", default_value = "localhost")]
    pub host: String,
    #[arg(long = "pg-port", env = "GEO_REST_PG_PORT", default_value_t = 5432)]
    pub port: u16,
    #[arg(long = "pg-username", env = "GEO_REST_PG_USERNAME")]
    pub username: Option<String>,
    #[arg(long = "pg-password", env = "GEO_REST_PG_PASSWORD")]
    pub password: Option<Secret>,
    /// The schema holding the served tables.
    #[arg(long = "pg-schema", env = "GEO_REST_PG_SCHEMA", default_value = DEFAULT_SCHEMA)]
    pub schema: String,
}

impl ConnectionSettings {
    /// Connection options for one database. Credentials are only passed on
    /// when they are configured.
    pub fn connect_options(&self, database: &str) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(database);
        let options = match &self.username {
            Some(username) => options.username(username),
            None => options,
        };
        match &self.password {
            Some(password) => options.password(password.expose()),
            None => options,
        }
    }
}
