//! SQL DDL for initializing the catalog.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `isbn13` UNIQUE, so concurrent adds of the same book cannot both land
/// - `rating` REAL, `pages` INTEGER
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    isbn13 TEXT NOT NULL UNIQUE,
    pages INTEGER NOT NULL,
    rating REAL NOT NULL,
    description TEXT NOT NULL
);
"#;
