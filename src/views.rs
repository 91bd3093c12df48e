//! Server-rendered pages. Every interpolated value goes through [`escape`].

use axum::response::Html;
use std::fmt::Write;

use crate::db::models::BookSummary;

pub fn login_page(flashes: &[String], error: Option<&str>) -> Html<String> {
    let mut body = flash_list(flashes);
    if let Some(error) = error {
        let _ = write!(body, r#"<p class="error"><strong>Error:</strong> {}</p>"#, escape(error));
    }
    body.push_str(
        r#"<form action="/login" method="post">
  <label>Username <input type="text" name="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Log in</button>
</form>"#,
    );
    layout("Log in", &body)
}

pub fn dashboard_page(books: &[BookSummary], flashes: &[String]) -> Html<String> {
    let mut body = flash_list(flashes);
    body.push_str(r#"<p><a href="/addBook">Add a book</a> | <a href="/logout">Log out</a></p>"#);
    if books.is_empty() {
        body.push_str("<p><em>Your library is empty.</em></p>");
        return layout("Dashboard", &body);
    }
    body.push_str(
        "<table>\n<tr><th>Title</th><th>Author</th><th>Pages</th><th>Rating</th><th></th></tr>\n",
    );
    for book in books {
        let _ = writeln!(
            body,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="/delete/{}">Delete</a></td></tr>"#,
            escape(&book.title),
            escape(&book.author),
            book.pages,
            book.rating,
            book.id
        );
    }
    body.push_str("</table>");
    layout("Dashboard", &body)
}

pub fn add_book_page() -> Html<String> {
    layout(
        "Add a book",
        r#"<form action="/addBook" method="post">
  <label>Search <input type="text" name="search"></label>
  <button type="submit">Search</button>
</form>
<p><a href="/dashboard">Back to dashboard</a></p>"#,
    )
}

fn flash_list(flashes: &[String]) -> String {
    if flashes.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"flashes\">\n");
    for message in flashes {
        let _ = writeln!(out, "<li>{}</li>", escape(message));
    }
    out.push_str("</ul>\n");
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Library</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
