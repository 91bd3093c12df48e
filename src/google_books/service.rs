use super::endpoints::GoogleBooksEndpoints;
use crate::config::Config;
use crate::db::models::NewBook;
use crate::error::BookshelfError;

use std::time::Duration;
use tracing::info;
use url::Url;

/// Resolves a free-text search term to the fields of one book.
#[derive(Clone)]
pub struct GoogleBooksService {
    client: reqwest::Client,
    endpoint: Url,
}

impl GoogleBooksService {
    /// Build the service with an HTTP client shaped by `cfg`.
    pub fn new(cfg: &Config) -> Result<Self, BookshelfError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("bookshelf/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(cfg.lookup_timeout_secs.max(1)));
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            endpoint: cfg.books_api_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One search request; the first hit must carry every catalog field.
    pub async fn search_book(&self, term: &str) -> Result<NewBook, BookshelfError> {
        let resp =
            GoogleBooksEndpoints::search_volumes(&self.endpoint, term, self.client.clone()).await?;
        let book = resp.into_first_book()?;
        info!(term, isbn13 = %book.isbn13, title = %book.title, "metadata resolved");
        Ok(book)
    }
}
