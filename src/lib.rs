pub mod config;
pub mod db;
pub mod error;
pub mod google_books;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod types;
pub mod views;

pub use config::Config;
pub use error::BookshelfError;
pub use google_books::GoogleBooksService;
