use sqlx::FromRow;

/// A full row of the `books` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn13: String,
    pub pages: i64,
    pub rating: f64,
    pub description: String,
}

/// The columns shown on the dashboard.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub pages: i64,
    pub rating: f64,
    pub id: i64,
}

/// A book resolved from metadata lookup, not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn13: String,
    pub pages: i64,
    pub rating: f64,
    pub description: String,
}

impl From<Book> for BookSummary {
    fn from(b: Book) -> Self {
        Self {
            title: b.title,
            author: b.author,
            pages: b.pages,
            rating: b.rating,
            id: b.id,
        }
    }
}

impl NewBook {
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn13: self.isbn13,
            pages: self.pages,
            rating: self.rating,
            description: self.description,
        }
    }
}
