//! Build the columns a statement returns.

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

/// The property columns by name, in ordinal order, followed by the geometry
/// column as GeoJSON text, if the table has one.
pub fn translate_fields(
    columns: &database::TableColumns,
    table_alias: &sql::ast::TableAlias,
) -> sql::ast::SelectList {
    let mut fields: Vec<(sql::ast::ColumnAlias, sql::ast::Expression)> = columns
        .property_columns()
        .map(|column| {
            (
                sql::helpers::make_column_alias(column.name.clone()),
                sql::helpers::column_of(table_alias, &column.name),
            )
        })
        .collect();

    if let Some(geometry) = columns.geometry_column() {
        fields.push((
            sql::helpers::make_column_alias(database::GEOMETRY_GEOJSON_ALIAS.to_string()),
            sql::helpers::call(
                sql::ast::Function::StAsGeoJson,
                vec![sql::helpers::column_of(table_alias, &geometry.name)],
            ),
        ));
    }

    sql::ast::SelectList::SelectList(fields)
}
