use axum::response::{Html, Json};
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn home() -> Html<&'static str> {
    Html(
        "<h2>Signed in.</h2><p>Ask <a href=\"/api/recommend_podcast\">/api/recommend_podcast</a> for your next podcast.</p>",
    )
}
