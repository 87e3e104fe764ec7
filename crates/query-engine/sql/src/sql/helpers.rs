//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WITH` clause.
pub fn empty_with() -> With {
    With {
        common_table_expressions: vec![],
    }
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// An empty `LIMIT` clause.
pub fn empty_limit() -> Limit {
    Limit { limit: None }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::True)
}

/// Combine expressions with `AND`. `true` operands are dropped, and an empty
/// iterator gives `true`.
pub fn and_all(expressions: impl IntoIterator<Item = Expression>) -> Expression {
    expressions
        .into_iter()
        .filter(|expression| *expression != true_expr())
        .reduce(|left, right| Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(true_expr)
}

// Aliasing //

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: String) -> TableAlias {
    TableAlias { name }
}

/// A table in a given schema.
pub fn db_table(schema: &str, table: &str) -> TableReference {
    TableReference::DBTable {
        schema: SchemaName(schema.to_string()),
        table: TableName(table.to_string()),
    }
}

/// Refer to a column of a table alias.
pub fn column_of(alias: &TableAlias, column: &str) -> Expression {
    Expression::ColumnReference(ColumnReference::TableColumn {
        table: TableReference::AliasedTable(alias.clone()),
        name: ColumnName(column.to_string()),
    })
}

// Expressions //

/// A function call.
pub fn call(function: Function, args: Vec<Expression>) -> Expression {
    Expression::FunctionCall { function, args }
}

/// Cast an expression to a type, `<expression>::"<type>"`.
pub fn cast(expression: Expression, type_name: &str) -> Expression {
    Expression::Cast {
        expression: Box::new(expression),
        r#type: ScalarType::BaseType(ScalarTypeName(type_name.to_string())),
    }
}

/// A binary operation.
pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>) -> Select {
    Select {
        with: empty_with(),
        select_list: SelectList::SelectList(select_list),
        from: None,
        where_: Where(true_expr()),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// `coalesce(json_agg(row_to_json(<table_alias>)), '[]')`
fn json_array_of_rows(table_alias: &TableAlias) -> Expression {
    call(
        Function::Coalesce,
        vec![
            call(
                Function::JsonAgg,
                vec![Expression::RowToJson(TableReference::AliasedTable(
                    table_alias.clone(),
                ))],
            ),
            Expression::Value(Value::EmptyJsonArray),
        ],
    )
}

/// Wrap a query in `SELECT coalesce(json_agg(row_to_json(<table_alias>)), '[]') AS <column_alias> FROM <query> as <table_alias>`.
///
/// - `row_to_json` takes a row and converts it to a json object.
/// - `json_agg` aggregates the json objects to a json array.
/// - `coalesce(<thing>, <otherwise>)` returns <thing> if it is not null, and <otherwise> if it is null.
pub fn select_table_as_json_array(
    select: Select,
    column_alias: ColumnAlias,
    table_alias: TableAlias,
) -> Select {
    let mut wrapper = simple_select(vec![(column_alias, json_array_of_rows(&table_alias))]);
    wrapper.from = Some(From::Select {
        select: Box::new(select),
        alias: table_alias,
    });
    wrapper
}

/// Run a data-modifying statement in a CTE and read its RETURNING rows as a json array:
/// `WITH <table_alias> AS (<statement>) SELECT coalesce(json_agg(row_to_json(<table_alias>)), '[]') AS <column_alias> FROM <table_alias> AS <table_alias>`.
pub fn select_mutation_as_json_array(
    statement: CTExpr,
    column_alias: ColumnAlias,
    table_alias: TableAlias,
) -> Select {
    let mut wrapper = simple_select(vec![(column_alias, json_array_of_rows(&table_alias))]);
    wrapper.with = With {
        common_table_expressions: vec![CommonTableExpression {
            alias: table_alias.clone(),
            statement,
        }],
    };
    wrapper.from = Some(From::Table {
        reference: TableReference::AliasedTable(table_alias.clone()),
        alias: table_alias,
    });
    wrapper
}
