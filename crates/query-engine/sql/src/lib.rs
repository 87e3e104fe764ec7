//! SQL AST, helpers for building it, and conversion to a parameterized SQL string.

pub mod sql;
