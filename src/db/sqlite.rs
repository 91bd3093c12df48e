use crate::db::models::{Book, BookSummary, NewBook};
use crate::db::schema::SQLITE_INIT;
use crate::error::BookshelfError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection};
use std::str::FromStr;
use tracing::{debug, warn};

pub type SqlitePool = Pool<Sqlite>;

/// Open the pool, creating the database file when missing, and bootstrap the schema.
pub async fn connect(database_url: &str) -> Result<SqlitePool, BookshelfError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), BookshelfError> {
    // sqlx::query runs one statement at a time
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(i64),
    Duplicate,
}

/// Catalog queries over a single borrowed connection.
///
/// Every statement autocommits; nothing here opens a transaction.
pub struct CatalogStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CatalogStore<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// All books in table order.
    pub async fn list_books(&mut self) -> Result<Vec<BookSummary>, BookshelfError> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT title, author, pages, rating, id FROM books",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    pub async fn get_book(&mut self, id: i64) -> Result<Option<Book>, BookshelfError> {
        let row = sqlx::query_as::<_, Book>(
            r#"SELECT id, title, author, isbn13, pages, rating, description
               FROM books WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Whether a book with this ISBN-13 is already stored.
    ///
    /// A failing query reports `true` so a broken lookup never lets a duplicate through.
    pub async fn book_exists(&mut self, isbn13: &str) -> bool {
        match sqlx::query("SELECT 1 FROM books WHERE isbn13 = ?")
            .bind(isbn13)
            .fetch_optional(&mut *self.conn)
            .await
        {
            Ok(row) => row.is_some(),
            Err(e) => {
                warn!(isbn13, error = %e, "existence check failed; treating as duplicate");
                true
            }
        }
    }

    /// Store a book unless its ISBN-13 is already present.
    pub async fn add_book(&mut self, book: &NewBook) -> Result<AddOutcome, BookshelfError> {
        if self.book_exists(&book.isbn13).await {
            debug!(isbn13 = %book.isbn13, "book already present");
            return Ok(AddOutcome::Duplicate);
        }
        self.insert_book(book).await
    }

    /// Plain insert; a `UNIQUE(isbn13)` violation is reported as a duplicate.
    pub(crate) async fn insert_book(&mut self, book: &NewBook) -> Result<AddOutcome, BookshelfError> {
        let res = sqlx::query(
            r#"INSERT INTO books (title, author, isbn13, pages, rating, description)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn13)
        .bind(book.pages)
        .bind(book.rating)
        .bind(&book.description)
        .execute(&mut *self.conn)
        .await;

        match res {
            Ok(done) => Ok(AddOutcome::Added(done.last_insert_rowid())),
            Err(e) => {
                let err = BookshelfError::from(e);
                if err.is_unique_violation() {
                    debug!(isbn13 = %book.isbn13, "insert hit unique constraint");
                    Ok(AddOutcome::Duplicate)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Delete by id. Returns the number of rows removed (0 for an unknown id).
    pub async fn delete_book(&mut self, id: i64) -> Result<u64, BookshelfError> {
        let done = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(done.rows_affected())
    }
}
