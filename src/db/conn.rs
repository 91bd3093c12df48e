use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::Sqlite;
use sqlx::pool::PoolConnection;

use crate::db::sqlite::{CatalogStore, SqlitePool};
use crate::error::BookshelfError;

/// One pooled connection for the lifetime of a request.
///
/// Acquired when the handler's arguments are extracted and returned to the pool
/// when the handler finishes, whichever way it exits.
pub struct DbConn(pub PoolConnection<Sqlite>);

impl DbConn {
    pub fn catalog(&mut self) -> CatalogStore<'_> {
        CatalogStore::new(&mut self.0)
    }
}

impl<S> FromRequestParts<S> for DbConn
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BookshelfError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = SqlitePool::from_ref(state);
        Ok(Self(pool.acquire().await?))
    }
}
