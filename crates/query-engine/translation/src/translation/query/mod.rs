//! Translate `query` and `read` actions into SELECT statements.

pub mod fields;
pub mod filtering;
pub mod values;

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

use super::error::Error;
use super::helpers;
use super::request::Conditions;

/// Translate a query with conditions into a SELECT over the target table.
///
/// Predicates are ANDed in condition order. Spatial orderings come first,
/// then `contains` orderings in path order.
pub fn translate_query(
    columns: &database::TableColumns,
    conditions: &Conditions,
) -> Result<sql::ast::Select, Error> {
    let table_alias = helpers::target_table_alias();

    let mut predicates = vec![];
    let mut order_by_elements = vec![];
    for condition in conditions.iter() {
        let compiled = filtering::translate_condition(columns, &table_alias, &condition)?;
        predicates.push(compiled.predicate);
        order_by_elements.extend(compiled.ordering);
    }

    let mut select = select_from_target(columns, table_alias);
    select.where_ = sql::ast::Where(sql::helpers::and_all(predicates));
    select.order_by = sql::ast::OrderBy {
        elements: order_by_elements,
    };
    select.limit = sql::ast::Limit {
        limit: conditions.limit,
    };
    Ok(select)
}

/// Translate a read of a single row by its identifier.
pub fn translate_read(
    columns: &database::TableColumns,
    id: &str,
) -> Result<sql::ast::Select, Error> {
    let table_alias = helpers::target_table_alias();
    let predicate = id_predicate(columns, &table_alias, id)?;

    let mut select = select_from_target(columns, table_alias);
    select.where_ = sql::ast::Where(predicate);
    Ok(select)
}

/// `<table_alias>.<id column> = <id>`
pub fn id_predicate(
    columns: &database::TableColumns,
    table_alias: &sql::ast::TableAlias,
    id: &str,
) -> Result<sql::ast::Expression, Error> {
    let id_column = columns
        .id_column()
        .ok_or_else(|| Error::NoIdColumn(columns.table.clone()))?;
    let operand = values::translate_operand(&id_column.name, Some(id_column), id)?;
    Ok(sql::helpers::binary(
        sql::helpers::column_of(table_alias, &id_column.name),
        sql::ast::BinaryOperator::Equals,
        operand,
    ))
}

fn select_from_target(
    columns: &database::TableColumns,
    table_alias: sql::ast::TableAlias,
) -> sql::ast::Select {
    let mut select = sql::helpers::simple_select(vec![]);
    select.select_list = fields::translate_fields(columns, &table_alias);
    select.from = Some(sql::ast::From::Table {
        reference: sql::helpers::db_table(&columns.schema, &columns.table),
        alias: table_alias,
    });
    select
}
