use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::db::{AddOutcome, DbConn};
use crate::error::BookshelfError;
use crate::middleware::auth::RequireAdmin;
use crate::middleware::session::Session;
use crate::router::BookshelfState;
use crate::views;

pub const BOOK_ADDED: &str = "Book added to library successfully.";
pub const BOOK_DUPLICATE: &str = "That book is already in your library.";
pub const BOOK_LOOKUP_FAILED: &str = "Error parsing book information. Please search again.";
pub const BOOK_SAVE_FAILED: &str = "The book could not be saved. Please try again.";
pub const BOOK_REMOVED: &str = "Book has been successfully removed from your library.";

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub search: String,
}

/// GET /dashboard -> the whole catalog. Logged-out visitors go back to /login.
pub async fn dashboard(session: Session, mut db: DbConn) -> Result<Response, BookshelfError> {
    if !session.is_logged_in() {
        debug!("dashboard requested without a session");
        return Ok(Redirect::to("/login").into_response());
    }
    let books = db.catalog().list_books().await?;
    let (session, flashes) = session.take_flashes();
    Ok((session, views::dashboard_page(&books, &flashes)).into_response())
}

/// GET /addBook
pub async fn add_book_form(_admin: RequireAdmin) -> Html<String> {
    views::add_book_page()
}

/// POST /addBook -> look the term up, store the first hit, report back on the dashboard.
pub async fn add_book(
    _admin: RequireAdmin,
    State(state): State<BookshelfState>,
    session: Session,
    mut db: DbConn,
    Form(form): Form<SearchForm>,
) -> Result<(Session, Redirect), BookshelfError> {
    let book = match state.books.search_book(&form.search).await {
        Ok(book) => book,
        Err(e) => {
            warn!(term = %form.search, error = %e, "metadata lookup failed");
            return Ok(back_to_dashboard(session, BOOK_LOOKUP_FAILED));
        }
    };

    let message = match db.catalog().add_book(&book).await {
        Ok(AddOutcome::Added(id)) => {
            info!(id, isbn13 = %book.isbn13, title = %book.title, "book added");
            BOOK_ADDED
        }
        Ok(AddOutcome::Duplicate) => {
            info!(isbn13 = %book.isbn13, "book already in library");
            BOOK_DUPLICATE
        }
        Err(e) => {
            warn!(isbn13 = %book.isbn13, error = %e, "failed to store book");
            BOOK_SAVE_FAILED
        }
    };
    Ok(back_to_dashboard(session, message))
}

/// GET /delete/{id}; an unknown id is a no-op.
pub async fn delete_book(
    _admin: RequireAdmin,
    Path(id): Path<i64>,
    session: Session,
    mut db: DbConn,
) -> Result<(Session, Redirect), BookshelfError> {
    let removed = db.catalog().delete_book(id).await?;
    info!(id, removed, "book delete requested");
    Ok(back_to_dashboard(session, BOOK_REMOVED))
}

fn back_to_dashboard(session: Session, message: &str) -> (Session, Redirect) {
    (session.flash(message), Redirect::to("/dashboard"))
}
