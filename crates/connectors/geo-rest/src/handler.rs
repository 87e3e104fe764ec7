//! Serve a request: parse it, introspect the table, translate, execute and
//! assemble the GeoJSON response.

use tracing::{info_span, Instrument};

use query_engine_execution::geojson::{self, GeoJson, ResultShape};
use query_engine_execution::{introspection, query};
use query_engine_translation::translation::{self, request::Action};

use crate::error::ServerError;
use crate::state::ServerState;

/// Handle one request end to end.
pub async fn handle(
    state: &ServerState,
    method: &str,
    path: &str,
    body: &str,
) -> Result<GeoJson, ServerError> {
    let action = translation::request::parse(method, path, body);
    tracing::info!(action = ?action);

    let (Some(database), Some(table)) = (action.database(), action.table()) else {
        return Err(ServerError::BadRequest(format!(
            "No route matches {method} {path}"
        )));
    };

    let pool = state.pool(database).await;

    // Classify the table's columns. This is the first round trip, so it is
    // where an unreachable database shows.
    let columns = match introspection::classify(&pool, state.schema(), table).await {
        Ok(columns) => columns,
        Err(err) => {
            if err.is_connection_failure() {
                state.forget_pool(database).await;
            }
            return Err(err.into());
        }
    };
    state.metrics.update_pool_metrics(database, &pool);

    // Compile the statement.
    let plan = async {
        translation::translate(&action, &columns).map_err(|err| {
            tracing::error!("{}", err);
            ServerError::from(err)
        })
    }
    .instrument(info_span!("Plan statement"))
    .await?;

    // Execute the statement.
    let rows = query::execute(&pool, plan).await?;

    let shape = match &action {
        Action::Query { .. } => ResultShape::Collection,
        _ => ResultShape::Single,
    };
    let response = async { geojson::assemble(rows, &columns, shape) }
        .instrument(info_span!("Create response"))
        .await?;

    // assuming the request succeeded, increment counter
    state.metrics.record_request(action.name());

    response.ok_or_else(|| {
        ServerError::NoRows(format!("No row in '{table}' matches the requested id."))
    })
}
