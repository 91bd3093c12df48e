//! Google Books volumes search, the metadata source for new catalog entries.

mod endpoints;
pub mod service;

pub use service::GoogleBooksService;
