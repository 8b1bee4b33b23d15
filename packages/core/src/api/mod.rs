//! HTTP surface: router assembly and cross-origin policy.

pub mod headers;
pub mod health;
pub mod venues;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::ALLOWED_ORIGINS;
use crate::store::VenueTable;

/// Build the full application router over a loaded table.
pub fn create_router(table: VenueTable) -> Router {
    Router::new()
        .route("/", get(health::root_status))
        .route("/health", get(health::health))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", get(venues::search_venues))
        .with_state(table)
        .layer(cors_layer())
}

/// GET-only CORS for the fixed origin allow-list, with credentials.
///
/// Requested headers are mirrored back: a literal `*` for
/// `Access-Control-Allow-Headers` is not honoured by browsers on
/// credentialed requests.
pub fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .copied()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
