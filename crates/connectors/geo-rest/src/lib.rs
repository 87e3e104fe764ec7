//! An HTTP server exposing PostGIS tables as GeoJSON, addressed by path.

pub mod error;
pub mod handler;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{create_state, ServerState};
