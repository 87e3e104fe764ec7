//! Type definitions of a SQL AST representation and its low-level string form.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod helpers;
pub mod string;
