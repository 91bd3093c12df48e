use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use tracing::warn;

pub const SESSION_COOKIE: &str = "logged_in";
pub const FLASH_COOKIE: &str = "flash";
/// Older messages are dropped beyond this so the cookie stays well under 4 KB.
pub const MAX_PENDING_FLASHES: usize = 5;

/// Whether session cookies carry the `Secure` attribute.
#[derive(Debug, Clone, Copy)]
pub struct CookieSecurity {
    pub secure: bool,
}

/// The browser session: the `logged_in` flag plus pending flash messages,
/// both kept in encrypted cookies.
///
/// Returned from a handler it writes back whatever changed.
pub struct Session {
    jar: PrivateCookieJar,
    secure: bool,
}

impl Session {
    pub fn new(jar: PrivateCookieJar, security: CookieSecurity) -> Self {
        Self {
            jar,
            secure: security.secure,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.jar
            .get(SESSION_COOKIE)
            .is_some_and(|c| c.value() == "true")
    }

    pub fn log_in(self) -> Self {
        let cookie = self.build_cookie(SESSION_COOKIE, "true".to_string());
        Self {
            jar: self.jar.add(cookie),
            secure: self.secure,
        }
    }

    pub fn log_out(self) -> Self {
        Self {
            jar: self.jar.remove(clear_cookie(SESSION_COOKIE)),
            secure: self.secure,
        }
    }

    /// Queue a message for the next rendered page.
    pub fn flash(self, message: impl Into<String>) -> Self {
        let mut pending = self.pending_flashes();
        pending.push(message.into());
        if pending.len() > MAX_PENDING_FLASHES {
            pending.drain(..pending.len() - MAX_PENDING_FLASHES);
        }
        let value = match serde_json::to_string(&pending) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to encode flash messages");
                return self;
            }
        };
        let cookie = self.build_cookie(FLASH_COOKIE, value);
        Self {
            jar: self.jar.add(cookie),
            secure: self.secure,
        }
    }

    /// Drain pending messages; they are shown once.
    pub fn take_flashes(self) -> (Self, Vec<String>) {
        let pending = self.pending_flashes();
        if pending.is_empty() {
            return (self, pending);
        }
        let session = Self {
            jar: self.jar.remove(clear_cookie(FLASH_COOKIE)),
            secure: self.secure,
        };
        (session, pending)
    }

    fn pending_flashes(&self) -> Vec<String> {
        self.jar
            .get(FLASH_COOKIE)
            .and_then(|c| serde_json::from_str(c.value()).ok())
            .unwrap_or_default()
    }

    fn build_cookie(&self, name: &str, value: String) -> Cookie<'static> {
        Cookie::build(Cookie::new(name.to_string(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .build()
}

impl<S> FromRequestParts<S> for Session
where
    Key: FromRef<S>,
    CookieSecurity: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self::new(jar, CookieSecurity::from_ref(state)))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Session {
        Session::new(
            PrivateCookieJar::new(Key::generate()),
            CookieSecurity { secure: false },
        )
    }

    #[test]
    fn new_session_is_logged_out() {
        assert!(!fresh().is_logged_in());
    }

    #[test]
    fn login_then_logout_clears_the_flag() {
        let session = fresh().log_in();
        assert!(session.is_logged_in());
        assert!(!session.log_out().is_logged_in());
    }

    #[test]
    fn logout_without_login_stays_logged_out() {
        assert!(!fresh().log_out().is_logged_in());
    }

    #[test]
    fn flashes_accumulate_and_drain_once() {
        let session = fresh().flash("first").flash("second");
        let (session, shown) = session.take_flashes();
        assert_eq!(shown, vec!["first".to_string(), "second".to_string()]);
        let (_, again) = session.take_flashes();
        assert!(again.is_empty());
    }

    #[test]
    fn undrained_flashes_keep_only_the_newest() {
        let mut session = fresh();
        for i in 0..50 {
            session = session.flash(format!("Book added to library successfully. #{i}"));
        }
        let (_, shown) = session.take_flashes();
        assert_eq!(shown.len(), MAX_PENDING_FLASHES);
        assert_eq!(
            shown.first().map(String::as_str),
            Some("Book added to library successfully. #45")
        );
        assert_eq!(
            shown.last().map(String::as_str),
            Some("Book added to library successfully. #49")
        );
    }
}
