use axum_extra::extract::cookie::Key;
use base64::Engine;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::BookshelfError;

pub const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const ENV_PREFIX: &str = "BOOKSHELF_";

/// Fields taken verbatim from the environment. figment's `Env` would parse
/// `123456` or `true` into a number or bool and lose leading zeros.
const VERBATIM_KEYS: [&str; 6] = [
    "listen_addr",
    "database_url",
    "admin_username",
    "admin_password",
    "session_secret",
    "loglevel",
];

/// Runtime configuration, resolved once at startup and handed to the router state.
///
/// Every field can be overridden by a `BOOKSHELF_`-prefixed environment variable,
/// e.g. `BOOKSHELF_ADMIN_PASSWORD` or `BOOKSHELF_DATABASE_URL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Base64 encoded, at least 64 bytes once decoded. Empty means a random key per process.
    pub session_secret: String,
    pub books_api_url: Url,
    pub lookup_timeout_secs: u64,
    pub proxy: Option<Url>,
    pub insecure_cookie: bool,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:library.db".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            session_secret: String::new(),
            books_api_url: Url::parse(DEFAULT_BOOKS_API_URL)
                .expect("DEFAULT_BOOKS_API_URL is a valid URL"),
            lookup_timeout_secs: 10,
            proxy: None,
            insecure_cookie: false,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults merged with the environment.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&VERBATIM_KEYS));
        for key in VERBATIM_KEYS {
            let var = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    pub fn load() -> Result<Self, BookshelfError> {
        Ok(Self::figment().extract()?)
    }

    /// Key used to encrypt the session and flash cookies.
    pub fn session_key(&self) -> Result<Key, BookshelfError> {
        let secret = self.session_secret.trim();
        if secret.is_empty() {
            warn!("session_secret not set; sessions will not survive a restart");
            return Ok(Key::generate());
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(secret)
            .map_err(|e| BookshelfError::InvalidConfig(format!("session_secret: {e}")))?;
        Key::try_from(bytes.as_slice()).map_err(|_| {
            BookshelfError::InvalidConfig(
                "session_secret must decode to at least 64 bytes".to_string(),
            )
        })
    }
}
