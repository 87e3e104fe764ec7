//! Compile path conditions into SQL predicates and orderings.

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

use super::super::error::Error;
use super::super::request::{Around, Condition, Point};
use super::values;

/// A compiled condition: a predicate to AND into the WHERE clause, and an
/// optional ORDER BY element.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub predicate: sql::ast::Expression,
    pub ordering: Option<sql::ast::OrderByElement>,
}

/// Compile a single condition against the columns of the queried table.
pub fn translate_condition(
    columns: &database::TableColumns,
    table_alias: &sql::ast::TableAlias,
    condition: &Condition,
) -> Result<Compiled, Error> {
    match condition {
        Condition::Is { field, value } => {
            let operand = values::translate_operand(field, columns.column(field), value)?;
            Ok(filter(sql::helpers::binary(
                sql::helpers::column_of(table_alias, field),
                sql::ast::BinaryOperator::Equals,
                operand,
            )))
        }
        Condition::In { field, values } => {
            let column = columns.column(field);
            let operands = values
                .iter()
                .map(|value| values::translate_operand(field, column, value))
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(filter(sql::ast::Expression::BinaryArrayOperation {
                left: Box::new(sql::helpers::column_of(table_alias, field)),
                operator: sql::ast::BinaryArrayOperator::In,
                right: operands,
            }))
        }
        Condition::Matches { field, value } => Ok(filter(sql::helpers::binary(
            sql::helpers::column_of(table_alias, field),
            sql::ast::BinaryOperator::TextSearchMatch,
            sql::helpers::call(
                sql::ast::Function::PlainToTsquery,
                vec![values::string_value(value)],
            ),
        ))),
        Condition::Contains { field, value } => {
            let text = || sql::helpers::cast(sql::helpers::column_of(table_alias, field), "varchar");
            let predicate = sql::helpers::binary(
                text(),
                sql::ast::BinaryOperator::CaseInsensitiveLike,
                values::string_value(&format!("%{}%", escape_like_pattern(value))),
            );
            let position = sql::ast::Expression::Position {
                needle: Box::new(lower(values::string_value(value))),
                haystack: Box::new(lower(text())),
            };
            Ok(Compiled {
                predicate,
                ordering: Some(ascending(position)),
            })
        }
        Condition::Closest(Point { lon, lat }) => {
            let geometry = geometry_column(columns, table_alias)?;
            Ok(Compiled {
                predicate: sql::helpers::true_expr(),
                ordering: Some(ascending(sql::helpers::binary(
                    geometry,
                    sql::ast::BinaryOperator::Distance,
                    point(*lon, *lat),
                ))),
            })
        }
        Condition::Maround(Around { radius, lon, lat }) => {
            let geography =
                sql::helpers::cast(geometry_column(columns, table_alias)?, "geography");
            let center = sql::helpers::cast(point(*lon, *lat), "geography");
            Ok(Compiled {
                predicate: sql::helpers::call(
                    sql::ast::Function::StDWithin,
                    vec![
                        geography.clone(),
                        center.clone(),
                        values::float_value(*radius),
                    ],
                ),
                ordering: Some(ascending(sql::helpers::call(
                    sql::ast::Function::StDistance,
                    vec![geography, center],
                ))),
            })
        }
    }
}

/// Escape the LIKE wildcards `%` and `_`, and the escape character itself.
pub fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

fn filter(predicate: sql::ast::Expression) -> Compiled {
    Compiled {
        predicate,
        ordering: None,
    }
}

fn ascending(target: sql::ast::Expression) -> sql::ast::OrderByElement {
    sql::ast::OrderByElement {
        target,
        direction: sql::ast::OrderByDirection::Asc,
    }
}

fn lower(expression: sql::ast::Expression) -> sql::ast::Expression {
    sql::helpers::call(sql::ast::Function::Lower, vec![expression])
}

/// `ST_SetSRID(ST_MakePoint(lon, lat), 4326)`
fn point(lon: f64, lat: f64) -> sql::ast::Expression {
    sql::helpers::call(
        sql::ast::Function::StSetSrid,
        vec![
            sql::helpers::call(
                sql::ast::Function::StMakePoint,
                vec![values::float_value(lon), values::float_value(lat)],
            ),
            sql::ast::Expression::Value(sql::ast::Value::Int8(database::WGS84_SRID)),
        ],
    )
}

fn geometry_column(
    columns: &database::TableColumns,
    table_alias: &sql::ast::TableAlias,
) -> Result<sql::ast::Expression, Error> {
    columns
        .geometry_column()
        .map(|column| sql::helpers::column_of(table_alias, &column.name))
        .ok_or_else(|| Error::NoGeometryColumn(columns.table.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like_pattern("world%"), "world\\%");
        assert_eq!(escape_like_pattern("a_b\\c"), "a\\_b\\\\c");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
