use axum::{http::StatusCode, response::Response};
use serde_json::json;

use crate::features::response::respond_with_json;

// liveness only, the database is not touched
pub async fn healthz_handler() -> Response {
    respond_with_json(StatusCode::OK, &json!({ "status": "ok" }))
}
