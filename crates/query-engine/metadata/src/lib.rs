//! Metadata information regarding the database tables we serve.

pub mod metadata;
