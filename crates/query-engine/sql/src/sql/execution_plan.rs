//! Describe the SQL statement to be run against the database for one request.

use super::ast;
use super::string;

/// Definition of an execution plan to be run against the database.
#[derive(Debug)]
pub struct ExecutionPlan {
    /// The table the statement targets. Used for logging.
    pub table: String,
    /// The statement. It always yields a single row with a single json array column.
    pub query: ast::Select,
}

impl ExecutionPlan {
    /// Extract the query component as SQL.
    pub fn query_sql(&self) -> string::SQL {
        select_to_sql(&self.query)
    }
}

/// Convert a SELECT to its string representation.
pub fn select_to_sql(select: &ast::Select) -> string::SQL {
    let mut sql = string::SQL::new();
    select.to_sql(&mut sql);
    sql
}

/// A simple execution plan with only a table name and a query.
pub fn simple_exec_plan(table: String, query: ast::Select) -> ExecutionPlan {
    ExecutionPlan { table, query }
}
