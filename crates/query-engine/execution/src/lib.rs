//! Run statements against a PostgreSQL database and shape their results as GeoJSON.

pub mod error;
pub mod geojson;
pub mod introspection;
pub mod metrics;
pub mod query;
