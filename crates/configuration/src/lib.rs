//! Settings for connecting to PostgreSQL, read once at startup from the command
//! line or the environment.

pub mod connection_settings;
pub mod values;

pub use connection_settings::{ConnectionSettings, DEFAULT_SCHEMA};
pub use values::{PoolSettings, Secret};
