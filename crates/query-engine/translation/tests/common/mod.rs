use query_engine_metadata::metadata::database;
use query_engine_sql::sql;
use query_engine_translation::translation;

/// A table with every kind of column:
/// `places(id int4 primary key, groupid int4, name varchar, ts_address tsvector, the_geom geometry)`.
pub fn places() -> database::TableColumns {
    let column = |name: &str, udt_name: &str| database::CatalogColumn {
        column_name: name.to_string(),
        udt_name: udt_name.to_string(),
        is_primary_key: name == "id",
    };
    database::TableColumns::classify(
        "public",
        "places",
        vec![
            column("id", "int4"),
            column("groupid", "int4"),
            column("name", "varchar"),
            column("ts_address", "tsvector"),
            column("the_geom", "geometry"),
        ],
    )
}

/// A table without a geometry column.
pub fn non_spatial() -> database::TableColumns {
    database::TableColumns::classify(
        "public",
        "non_spatial",
        vec![
            database::CatalogColumn {
                column_name: "id".to_string(),
                udt_name: "integer".to_string(),
                is_primary_key: false,
            },
            database::CatalogColumn {
                column_name: "name".to_string(),
                udt_name: "text".to_string(),
                is_primary_key: false,
            },
        ],
    )
}

/// Parse a request, translate it against the given table, and return the SQL
/// and its parameters.
pub fn test_translation(
    columns: &database::TableColumns,
    method: &str,
    path: &str,
    body: &str,
) -> Result<(String, Vec<sql::string::Param>), translation::error::Error> {
    let action = translation::request::parse(method, path, body);
    let plan = translation::translate(&action, columns)?;
    let query = plan.query_sql();
    Ok((query.sql, query.params))
}

/// Render SQL for reading in assertion failures.
pub fn pretty(sql: &str) -> String {
    sqlformat::format(
        sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    )
}
