//! Translate a parsed request into an ExecutionPlan (SQL) to be run against the database.

pub mod error;
pub mod helpers;
pub mod mutation;
pub mod query;
pub mod request;

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

use error::Error;
use request::Action;

/// Translate an action on a table into a single statement. The statement
/// always returns one row with one json array column, holding the rows read
/// or affected.
pub fn translate(
    action: &Action,
    columns: &database::TableColumns,
) -> Result<sql::execution_plan::ExecutionPlan, Error> {
    check_reserved_names(columns)?;

    let json_select = match action {
        Action::Query { conditions, .. } => {
            wrap_select(query::translate_query(columns, conditions)?)
        }
        Action::Read { id, .. } => wrap_select(query::translate_read(columns, id)?),
        Action::Create { body, .. } => wrap_mutation(mutation::translate_create(columns, body)?),
        Action::Update { id, body, .. } => {
            wrap_mutation(mutation::translate_update(columns, id, body)?)
        }
        Action::Delete { id, .. } => wrap_mutation(mutation::translate_delete(columns, id)?),
        Action::Unknown => return Err(Error::UnknownAction),
    };

    // log and return
    tracing::debug!("SQL AST: {:?}", json_select);
    Ok(sql::execution_plan::simple_exec_plan(
        columns.table.clone(),
        json_select,
    ))
}

/// The geometry is returned under its own alias, so no other returned column
/// may carry that name.
fn check_reserved_names(columns: &database::TableColumns) -> Result<(), Error> {
    if columns.geometry_column().is_none() {
        return Ok(());
    }
    match columns
        .property_columns()
        .find(|column| column.name == database::GEOMETRY_GEOJSON_ALIAS)
    {
        Some(column) => Err(Error::ReservedColumnName {
            table: columns.table.clone(),
            column: column.name.clone(),
        }),
        None => Ok(()),
    }
}

fn wrap_select(select: sql::ast::Select) -> sql::ast::Select {
    sql::helpers::select_table_as_json_array(
        select,
        helpers::rows_column_alias(),
        helpers::rows_table_alias(),
    )
}

fn wrap_mutation(statement: sql::ast::CTExpr) -> sql::ast::Select {
    sql::helpers::select_mutation_as_json_array(
        statement,
        helpers::rows_column_alias(),
        helpers::affected_table_alias(),
    )
}
