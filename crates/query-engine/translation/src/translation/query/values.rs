//! Handle the translation of operand values taken from the path.

use query_engine_metadata::metadata::database;
use query_engine_sql::sql;

use super::super::error::Error;

/// Convert a path operand compared against a column into a SQL expression.
///
/// Operands of integer columns are parsed and rendered inline. Everything else
/// is a bound string parameter, cast to the column's native type when the
/// column is known.
pub fn translate_operand(
    field: &str,
    column: Option<&database::ColumnDescriptor>,
    value: &str,
) -> Result<sql::ast::Expression, Error> {
    match column {
        Some(column) if column.is_integer() => value
            .parse::<i64>()
            .map(|integer| sql::ast::Expression::Value(sql::ast::Value::Int8(integer)))
            .map_err(|_| Error::InvalidInteger {
                column: field.to_string(),
                value: value.to_string(),
            }),
        Some(column) => Ok(sql::helpers::cast(
            string_value(value),
            &column.native_type,
        )),
        // the database reports the unknown column
        None => Ok(string_value(value)),
    }
}

/// A bound string parameter.
pub fn string_value(value: &str) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::String(value.to_string()))
}

/// A bound double precision parameter.
pub fn float_value(value: f64) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::Float8(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(native_type: &str) -> database::ColumnDescriptor {
        database::ColumnDescriptor {
            name: "c".to_string(),
            native_type: native_type.to_string(),
            category: database::ColumnCategory::Plain,
            is_primary_key: false,
        }
    }

    #[test]
    fn integers_are_inlined() {
        assert_eq!(
            translate_operand("c", Some(&column("int4")), "-22"),
            Ok(sql::ast::Expression::Value(sql::ast::Value::Int8(-22)))
        );
    }

    #[test]
    fn non_integers_for_integer_columns_are_rejected() {
        assert_eq!(
            translate_operand("c", Some(&column("integer")), "22; DROP TABLE x"),
            Err(Error::InvalidInteger {
                column: "c".to_string(),
                value: "22; DROP TABLE x".to_string(),
            })
        );
    }

    #[test]
    fn other_values_are_cast_parameters() {
        assert_eq!(
            translate_operand("c", Some(&column("varchar")), "22"),
            Ok(sql::helpers::cast(string_value("22"), "varchar"))
        );
        assert_eq!(translate_operand("c", None, "22"), Ok(string_value("22")));
    }
}
