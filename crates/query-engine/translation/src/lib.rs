//! Translate an incoming request into a SQL statement.

pub mod translation;
