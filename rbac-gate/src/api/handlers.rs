use axum::{
    http::{Method, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::json;

pub async fn health_checker_handler() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}

/// Echo the request line back; stands in for the protected application.
pub async fn echo_handler(method: Method, uri: Uri) -> impl IntoResponse {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
    }))
}
