//! Errors for translation.

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("The request does not match any route.")]
    UnknownAction,
    #[error("Column '{column}' holds integers, but '{value}' is not an integer.")]
    InvalidInteger { column: String, value: String },
    #[error("Table '{0}' has no geometry column.")]
    NoGeometryColumn(String),
    #[error("Table '{0}' has neither a primary key nor an 'id' column.")]
    NoIdColumn(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Nothing to update.")]
    NothingToUpdate,
    #[error("Table '{table}' has a column named '{column}', which is reserved for the geometry.")]
    ReservedColumnName { table: String, column: String },
}
