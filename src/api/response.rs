use axum::Json;
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::models::{ErrorResponse, ScrapeResponse};

pub fn success(data: Value) -> (StatusCode, Json<ScrapeResponse>) {
    (StatusCode::OK, Json(ScrapeResponse::from_data(data)))
}

pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(message)))
}
