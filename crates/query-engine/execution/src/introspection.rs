//! Classify the columns of a table by asking the database catalog.

use query_engine_metadata::metadata::database;
use sqlx::Row;
use tracing::{info_span, Instrument};

use crate::error::Error;

/// Columns of one table in ordinal order, with their type name and whether
/// they belong to the table's primary key, as a single json array.
const COLUMNS_QUERY: &str = "\
SELECT coalesce(json_agg(json_build_object(
    'column_name', c.column_name,
    'udt_name', c.udt_name,
    'is_primary_key', EXISTS (
        SELECT 1
        FROM information_schema.table_constraints AS tc
        JOIN information_schema.key_column_usage AS kcu
          ON kcu.constraint_schema = tc.constraint_schema
         AND kcu.constraint_name = tc.constraint_name
        WHERE tc.constraint_type = 'PRIMARY KEY'
          AND tc.table_schema = c.table_schema
          AND tc.table_name = c.table_name
          AND kcu.column_name = c.column_name
    )
) ORDER BY c.ordinal_position), '[]') AS \"columns\"
FROM information_schema.columns AS c
WHERE c.table_schema = $1 AND c.table_name = $2";

/// Introspect a table and classify its columns. One round trip, never cached.
pub async fn classify(
    pool: &sqlx::PgPool,
    schema: &str,
    table: &str,
) -> Result<database::TableColumns, Error> {
    let catalog: serde_json::Value = async {
        sqlx::query(COLUMNS_QUERY)
            .bind(schema)
            .bind(table)
            .fetch_one(pool)
            .await?
            .try_get::<serde_json::Value, _>(0)
            .map_err(Error::DB)
    }
    .instrument(info_span!("Introspect table", schema, table))
    .await?;

    let catalog: Vec<database::CatalogColumn> = serde_json::from_value(catalog)
        .map_err(|err| Error::UnexpectedResult(err.to_string()))?;

    let columns = database::TableColumns::classify(schema, table, catalog);
    if columns.is_empty() {
        return Err(Error::TableNotFound {
            schema: schema.to_string(),
            table: table.to_string(),
        });
    }

    tracing::debug!(columns = ?columns.columns, "classified columns");
    Ok(columns)
}
