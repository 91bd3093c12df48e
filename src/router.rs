use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::db::SqlitePool;
use crate::error::BookshelfError;
use crate::google_books::GoogleBooksService;
use crate::handlers::{auth, catalog};
use crate::middleware::auth::AdminCredentials;
use crate::middleware::session::CookieSecurity;

/// Everything a handler may need, built once at startup.
#[derive(Clone)]
pub struct BookshelfState {
    pub pool: SqlitePool,
    pub books: GoogleBooksService,
    pub credentials: AdminCredentials,
    key: Key,
    cookies: CookieSecurity,
}

impl BookshelfState {
    pub fn new(
        cfg: &Config,
        pool: SqlitePool,
        books: GoogleBooksService,
    ) -> Result<Self, BookshelfError> {
        Ok(Self {
            pool,
            books,
            credentials: AdminCredentials::from_config(cfg),
            key: cfg.session_key()?,
            cookies: CookieSecurity {
                secure: !cfg.insecure_cookie,
            },
        })
    }
}

impl FromRef<BookshelfState> for Key {
    fn from_ref(state: &BookshelfState) -> Self {
        state.key.clone()
    }
}

impl FromRef<BookshelfState> for SqlitePool {
    fn from_ref(state: &BookshelfState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<BookshelfState> for CookieSecurity {
    fn from_ref(state: &BookshelfState) -> Self {
        state.cookies
    }
}

pub fn bookshelf_router(state: BookshelfState) -> Router {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(catalog::dashboard))
        .route(
            "/addBook",
            get(catalog::add_book_form).post(catalog::add_book),
        )
        .route("/delete/{id}", get(catalog::delete_book))
        .with_state(state)
}
