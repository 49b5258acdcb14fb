use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single upload page; it posts to `/api/v1/classify` and renders the result.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
