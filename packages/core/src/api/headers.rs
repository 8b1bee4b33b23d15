//! Conditional-GET helpers for the venue endpoints.
//!
//! The table never changes after startup, so a response is fully described
//! by a hash of its body plus the table's load time.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};

pub const VENUES_MAX_AGE: u32 = 60;
pub const VENUES_SWR: u32 = 300;

/// Validators attached to a JSON response.
#[derive(Debug, Clone)]
pub struct Validators {
    pub etag: String,
    pub last_modified: HeaderValue,
}

impl Validators {
    pub fn for_body(body: &[u8], loaded_at: DateTime<Utc>) -> Self {
        let mut hasher = DefaultHasher::new();
        body.hash(&mut hasher);
        Self {
            etag: format!("\"{:x}\"", hasher.finish()),
            last_modified: http_date(loaded_at),
        }
    }

    /// True when `If-None-Match` lists `*` or this ETag (weak comparison).
    pub fn matches(&self, request_headers: &HeaderMap) -> bool {
        request_headers
            .get_all(header::IF_NONE_MATCH)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| raw.split(','))
            .map(|tag| tag.trim())
            .any(|tag| tag == "*" || tag.trim_start_matches("W/") == self.etag)
    }
}

fn cache_control() -> HeaderValue {
    HeaderValue::from_str(&format!(
        "max-age={}, stale-while-revalidate={}",
        VENUES_MAX_AGE, VENUES_SWR
    ))
    .expect("cache-control header value should be valid")
}

/// RFC 7231 IMF-fixdate.
fn http_date(timestamp: DateTime<Utc>) -> HeaderValue {
    HeaderValue::from_str(&timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .expect("http-date header value should be valid")
}

/// Build a `200` JSON response, or an empty `304` when the client already
/// holds this body.
pub fn conditional_json(
    request_headers: &HeaderMap,
    body: Vec<u8>,
    loaded_at: DateTime<Utc>,
) -> Response {
    let validators = Validators::for_body(&body, loaded_at);

    let builder = Response::builder()
        .header(header::CACHE_CONTROL, cache_control())
        .header(header::ETAG, validators.etag.as_str())
        .header(header::LAST_MODIFIED, validators.last_modified.clone());

    if validators.matches(request_headers) {
        return builder
            .status(StatusCode::NOT_MODIFIED)
            .body(Body::empty())
            .expect("304 response should be valid");
    }

    builder
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("json response should be valid")
}
