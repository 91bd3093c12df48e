use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::Key;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::config::Config;
use crate::error::BookshelfError;
use crate::middleware::session::{CookieSecurity, Session};

/// The single static admin account.
#[derive(Clone)]
pub struct AdminCredentials {
    username: Arc<str>,
    password: Arc<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRejection {
    InvalidUsername,
    InvalidPassword,
}

impl LoginRejection {
    pub fn message(self) -> &'static str {
        match self {
            LoginRejection::InvalidUsername => "Invalid username",
            LoginRejection::InvalidPassword => "Invalid password",
        }
    }
}

impl fmt::Display for LoginRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl AdminCredentials {
    pub fn new(username: impl Into<Arc<str>>, password: impl Into<Arc<str>>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.admin_username.as_str(), cfg.admin_password.as_str())
    }

    /// Username is checked before password.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), LoginRejection> {
        if !bool::from(username.as_bytes().ct_eq(self.username.as_bytes())) {
            return Err(LoginRejection::InvalidUsername);
        }
        if !bool::from(password.as_bytes().ct_eq(self.password.as_bytes())) {
            return Err(LoginRejection::InvalidPassword);
        }
        Ok(())
    }
}

/// Rejects the request with 401 unless the session flag is set.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    Key: FromRef<S>,
    CookieSecurity: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BookshelfError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        if session.is_logged_in() {
            return Ok(Self);
        }
        debug!(path = %parts.uri.path(), "rejecting unauthenticated request");
        Err(BookshelfError::Unauthorized)
    }
}
