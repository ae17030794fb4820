//! Upload page served at `/`.

use axum::response::Html;

/// Embedded upload form.
static INDEX_HTML: &str = include_str!("index.html");

/// Serve the upload form.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
