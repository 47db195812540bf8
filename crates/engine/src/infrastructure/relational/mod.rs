//! Relational store adapters (the migration's read side).

mod sqlite_source;

pub use sqlite_source::SqliteRelationalSource;
