//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `books` table (one catalog entry per row)
///
/// AUTOINCREMENT keeps ids monotonic, so an id freed by a delete is never
/// reissued to a later insert.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL
);
"#;
