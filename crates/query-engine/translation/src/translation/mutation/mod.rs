//! Translate `create`, `update` and `delete` actions into data-modifying
//! statements. Each one returns the affected rows with the same columns a
//! query would.

pub mod body;

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

use super::error::Error;
use super::helpers;
use super::query;

/// `INSERT INTO <table> AS target (<columns>) SELECT record.<column>, ... FROM
/// jsonb_populate_record(NULL::<table>, <properties>) AS record RETURNING ...`
pub fn translate_create(
    columns: &database::TableColumns,
    body: &str,
) -> Result<sql::ast::CTExpr, Error> {
    let record = body::parse_record(body, columns)?;
    let table_alias = helpers::target_table_alias();
    let record_alias = helpers::record_table_alias();

    let mut insert_columns = vec![];
    let mut select_list = vec![];
    for name in record.properties.keys() {
        insert_columns.push(sql::ast::ColumnName(name.clone()));
        select_list.push((
            sql::helpers::make_column_alias(name.clone()),
            sql::helpers::column_of(&record_alias, name),
        ));
    }
    if let (Some(Some(geometry)), Some(column)) = (&record.geometry, columns.geometry_column()) {
        insert_columns.push(sql::ast::ColumnName(column.name.clone()));
        select_list.push((
            sql::helpers::make_column_alias(column.name.clone()),
            geometry_from_geojson(geometry),
        ));
    }

    let from = if insert_columns.is_empty() {
        sql::ast::InsertFrom::DefaultValues
    } else {
        let mut select = sql::helpers::simple_select(select_list);
        select.from = Some(populate_record(columns, record.properties, record_alias));
        sql::ast::InsertFrom::Select(Box::new(select))
    };

    Ok(sql::ast::CTExpr::Insert(sql::ast::Insert {
        table: sql::helpers::db_table(&columns.schema, &columns.table),
        columns: insert_columns,
        from,
        returning: sql::ast::Returning(query::fields::translate_fields(columns, &table_alias)),
        alias: table_alias,
    }))
}

/// `UPDATE <table> AS target SET <column> = record.<column>, ... FROM
/// jsonb_populate_record(NULL::<table>, <properties>) AS record WHERE
/// target.<id> = <id> RETURNING ...`
pub fn translate_update(
    columns: &database::TableColumns,
    id: &str,
    body: &str,
) -> Result<sql::ast::CTExpr, Error> {
    let record = body::parse_record(body, columns)?;
    let table_alias = helpers::target_table_alias();
    let record_alias = helpers::record_table_alias();
    let predicate = query::id_predicate(columns, &table_alias, id)?;

    let mut set: Vec<(sql::ast::ColumnName, sql::ast::Expression)> = record
        .properties
        .keys()
        .map(|name| {
            (
                sql::ast::ColumnName(name.clone()),
                sql::helpers::column_of(&record_alias, name),
            )
        })
        .collect();
    if let (Some(geometry), Some(column)) = (&record.geometry, columns.geometry_column()) {
        let value = match geometry {
            Some(geometry) => geometry_from_geojson(geometry),
            None => sql::ast::Expression::Value(sql::ast::Value::Null),
        };
        set.push((sql::ast::ColumnName(column.name.clone()), value));
    }
    if set.is_empty() {
        return Err(Error::NothingToUpdate);
    }

    let from = if record.properties.is_empty() {
        None
    } else {
        Some(populate_record(columns, record.properties, record_alias))
    };

    Ok(sql::ast::CTExpr::Update(sql::ast::Update {
        table: sql::helpers::db_table(&columns.schema, &columns.table),
        set,
        from,
        where_: sql::ast::Where(predicate),
        returning: sql::ast::Returning(query::fields::translate_fields(columns, &table_alias)),
        alias: table_alias,
    }))
}

/// `DELETE FROM <table> AS target WHERE target.<id> = <id> RETURNING ...`
pub fn translate_delete(
    columns: &database::TableColumns,
    id: &str,
) -> Result<sql::ast::CTExpr, Error> {
    let table_alias = helpers::target_table_alias();
    let predicate = query::id_predicate(columns, &table_alias, id)?;

    Ok(sql::ast::CTExpr::Delete(sql::ast::Delete {
        from: sql::ast::From::Table {
            reference: sql::helpers::db_table(&columns.schema, &columns.table),
            alias: table_alias.clone(),
        },
        where_: sql::ast::Where(predicate),
        returning: sql::ast::Returning(query::fields::translate_fields(columns, &table_alias)),
    }))
}

/// Decode the body properties into a row of the table's type, so every value
/// is converted by the database to its column type.
fn populate_record(
    columns: &database::TableColumns,
    properties: serde_json::Map<String, serde_json::Value>,
    alias: sql::ast::TableAlias,
) -> sql::ast::From {
    sql::ast::From::JsonbPopulateRecord {
        table: sql::helpers::db_table(&columns.schema, &columns.table),
        expression: sql::ast::Expression::Value(sql::ast::Value::JsonValue(
            serde_json::Value::Object(properties),
        )),
        alias,
    }
}

/// `ST_GeomFromGeoJSON(<geometry>)`
fn geometry_from_geojson(geometry: &serde_json::Value) -> sql::ast::Expression {
    sql::helpers::call(
        sql::ast::Function::StGeomFromGeoJson,
        vec![sql::ast::Expression::Value(sql::ast::Value::String(
            geometry.to_string(),
        ))],
    )
}
