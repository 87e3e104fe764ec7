//! Execute an execution plan against the database.

use query_engine_sql::sql;
use sqlx::Row;
use tracing::{info_span, Instrument};

use crate::error::Error;

/// Execute a plan and return the rows it read or affected.
pub async fn execute(
    pool: &sqlx::PgPool,
    plan: sql::execution_plan::ExecutionPlan,
) -> Result<Vec<serde_json::Value>, Error> {
    let query = plan.query_sql();

    tracing::info!(
        table = %plan.table,
        generated_sql = %query.sql,
        params = ?&query.params,
    );

    // the statement returns a single row with a single json array column
    let rows: serde_json::Value = async {
        build_query_with_params(&query)
            .fetch_one(pool)
            .await?
            .try_get::<serde_json::Value, _>(0)
            .map_err(Error::DB)
    }
    .instrument(info_span!("Execute statement"))
    .await?;

    match rows {
        serde_json::Value::Array(rows) => Ok(rows),
        other => Err(Error::UnexpectedResult(format!(
            "expected a json array of rows, got {other}"
        ))),
    }
}

/// Create a SQLx query based on our SQL query and bind our parameters to it.
fn build_query_with_params(
    query: &sql::string::SQL,
) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .params
        .iter()
        .fold(sqlx::query(query.sql.as_str()), |sqlx_query, param| {
            match param {
                sql::string::Param::String(s) => sqlx_query.bind(s),
                sql::string::Param::Float(f) => sqlx_query.bind(f),
                sql::string::Param::Value(v) => sqlx_query.bind(v),
            }
        })
}
