use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::middleware::session::Session;
use crate::router::BookshelfState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET / -> /login
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

/// GET /login
pub async fn login_page(session: Session) -> (Session, Html<String>) {
    let (session, flashes) = session.take_flashes();
    (session, views::login_page(&flashes, None))
}

/// POST /login -> sets the session flag on a matching username/password pair.
pub async fn login_submit(
    State(state): State<BookshelfState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.credentials.verify(&form.username, &form.password) {
        Ok(()) => {
            info!(username = %form.username, "admin logged in");
            let session = session
                .log_in()
                .flash("You've been logged in successfully.");
            (session, Redirect::to("/dashboard")).into_response()
        }
        Err(reason) => {
            warn!(username = %form.username, %reason, "login rejected");
            views::login_page(&[], Some(reason.message())).into_response()
        }
    }
}

/// GET /logout
pub async fn logout(session: Session) -> (Session, Redirect) {
    info!("admin logged out");
    let session = session
        .log_out()
        .flash("You've been logged out successfully.");
    (session, Redirect::to("/login"))
}
