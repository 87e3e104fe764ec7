//! Metadata information regarding the database and tracked information.

pub mod database;

// re-export without modules
pub use database::*;
