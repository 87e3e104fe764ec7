//! Errors that can be thrown when executing statements.

/// Errors raised while talking to the database or reading its results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    DB(#[from] sqlx::Error),
    #[error("Table '{schema}.{table}' not found.")]
    TableNotFound { schema: String, table: String },
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Unexpected result from the database: {0}")]
    UnexpectedResult(String),
}

/// SQLSTATE of a connection to a database that does not exist.
const INVALID_CATALOG_NAME: &str = "3D000";

impl Error {
    /// Whether the database could not be reached at all, as opposed to a
    /// statement failing on a working connection.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            Error::DB(sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut) => {
                true
            }
            Error::DB(sqlx::Error::Database(err)) => {
                err.code().as_deref() == Some(INVALID_CATALOG_NAME)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_databases_are_connection_failures() {
        assert!(Error::DB(sqlx::Error::PoolTimedOut).is_connection_failure());
        assert!(Error::DB(sqlx::Error::Io(std::io::Error::from(
            std::io::ErrorKind::ConnectionRefused
        )))
        .is_connection_failure());
    }

    #[test]
    fn statement_failures_are_not_connection_failures() {
        assert!(!Error::DB(sqlx::Error::RowNotFound).is_connection_failure());
        assert!(!Error::TableNotFound {
            schema: "public".to_string(),
            table: "places".to_string(),
        }
        .is_connection_failure());
    }
}
