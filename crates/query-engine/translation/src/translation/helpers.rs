//! Names shared by the statements we build.

use query_engine_sql::sql;

/// The alias of the table a statement reads from or writes to.
pub fn target_table_alias() -> sql::ast::TableAlias {
    sql::helpers::make_table_alias("target".to_string())
}

/// The alias of the row decoded from a request body.
pub fn record_table_alias() -> sql::ast::TableAlias {
    sql::helpers::make_table_alias("record".to_string())
}

/// The alias of the rows affected by a mutation.
pub fn affected_table_alias() -> sql::ast::TableAlias {
    sql::helpers::make_table_alias("affected".to_string())
}

/// The alias of the wrapped result rows.
pub fn rows_table_alias() -> sql::ast::TableAlias {
    sql::helpers::make_table_alias("rows".to_string())
}

/// The single json array column every statement returns.
pub fn rows_column_alias() -> sql::ast::ColumnAlias {
    sql::helpers::make_column_alias(ROWS_COLUMN.to_string())
}

/// Name of the single json array column every statement returns.
pub const ROWS_COLUMN: &str = "rows";
