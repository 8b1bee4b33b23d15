use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const STATUS_MESSAGE: &str = "Venue directory API is running";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// `GET /`
pub async fn root_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE,
    })
}

/// `GET /health` liveness probe.
pub async fn health() -> impl IntoResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .body(Body::from("ok"))
        .expect("health response should be valid")
}
