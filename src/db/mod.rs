//! Database module: the `books` catalog and its per-request connection.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and the catalog queries
//! - `conn.rs`: request extractor handing each handler its own pooled connection

pub mod conn;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use conn::DbConn;
pub use models::{Book, BookSummary, NewBook};
pub use schema::SQLITE_INIT;
pub use sqlite::{AddOutcome, CatalogStore, SqlitePool, connect, init_schema};
