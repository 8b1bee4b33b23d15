use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};

use crate::error::AppError;
use crate::store::VenueTable;
use super::headers::conditional_json;

const TYPE_PARAM: &str = "type";

/// Last `type` value in the query string; repeated keys do not reject.
fn requested_type(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .filter(|(key, _)| key == TYPE_PARAM)
        .map(|(_, value)| value)
        .last()
}

/// `GET /venues`
pub async fn list_venues(
    State(table): State<VenueTable>,
    request_headers: HeaderMap,
) -> Result<Response, AppError> {
    let body = serde_json::to_vec(table.all())
        .map_err(|err| AppError::Serialization(err.to_string()))?;

    tracing::debug!("Listing {} venues", table.len());
    Ok(conditional_json(&request_headers, body, table.loaded_at()))
}

/// `GET /venues/search?type=<kind>`
pub async fn search_venues(
    State(table): State<VenueTable>,
    Query(pairs): Query<Vec<(String, String)>>,
    request_headers: HeaderMap,
) -> Result<Response, AppError> {
    let kind = requested_type(pairs).ok_or_else(|| {
        tracing::warn!("Rejected venue search without `type` parameter");
        AppError::Validation("missing required query parameter `type`".to_string())
    })?;

    let matches = table.find_by_type(&kind);
    let body = serde_json::to_vec(&matches)
        .map_err(|err| AppError::Serialization(err.to_string()))?;

    tracing::debug!("Search type={:?} matched {} venues", kind, matches.len());
    Ok(conditional_json(&request_headers, body, table.loaded_at()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::venue::Venue;

    fn make_venue(id: i64, name: &str, kind: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            lat: 51.5,
            lng: -0.12,
            kind: kind.to_string(),
            address: String::new(),
            description: String::new(),
            phone: String::new(),
            website: String::new(),
            mon: 1,
            tue: 1,
            wed: 1,
            thu: 1,
            fri: 1,
            sat: 0,
            sun: 0,
            payment: 1,
            price: 0.0,
            info_website: String::new(),
        }
    }

    fn make_app() -> Router {
        make_app_with(vec![
            make_venue(1, "Bean There", "Cafe"),
            make_venue(2, "Joe's Bar", "Bar"),
            make_venue(3, "Grind", "Cafe"),
        ])
    }

    fn make_app_with(venues: Vec<Venue>) -> Router {
        let loaded_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        Router::new()
            .route("/venues", get(list_venues))
            .route("/venues/search", get(search_venues))
            .with_state(VenueTable::with_loaded_at(venues, loaded_at))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ids(json: &Value) -> Vec<i64> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn list_returns_every_venue_in_id_order() {
        let (status, json) = get_json(make_app(), "/venues").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![1, 2, 3]);
        assert_eq!(json[1]["name"], "Joe's Bar");
        assert_eq!(json[1]["type"], "Bar");
    }

    #[tokio::test]
    async fn search_returns_exact_matches_only() {
        let (status, json) = get_json(make_app(), "/venues/search?type=Cafe").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![1, 3]);
    }

    #[tokio::test]
    async fn search_is_case_sensitive() {
        let (status, json) = get_json(make_app(), "/venues/search?type=cafe").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn search_decodes_percent_encoded_type() {
        let app = make_app_with(vec![make_venue(1, "Tate", "Art Gallery")]);
        let (_, json) = get_json(app, "/venues/search?type=Art%20Gallery").await;
        assert_eq!(ids(&json), vec![1]);
    }

    #[tokio::test]
    async fn search_without_type_is_bad_request() {
        let (status, json) = get_json(make_app(), "/venues/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("type"));
    }

    #[tokio::test]
    async fn search_with_other_params_but_no_type_is_bad_request() {
        let (status, _) = get_json(make_app(), "/venues/search?kind=Cafe").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_with_repeated_type_uses_last_value() {
        let (status, json) = get_json(make_app(), "/venues/search?type=Cafe&type=Bar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![2]);
    }

    #[tokio::test]
    async fn search_with_empty_type_matches_untyped_venues() {
        let app = make_app_with(vec![
            make_venue(1, "Bean There", "Cafe"),
            make_venue(2, "Mystery Spot", ""),
        ]);
        let (status, json) = get_json(app, "/venues/search?type=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![2]);
    }

    #[tokio::test]
    async fn search_with_empty_type_and_no_untyped_venues_is_empty() {
        let (status, json) = get_json(make_app(), "/venues/search?type=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn list_reports_table_load_time_as_last_modified() {
        let response = make_app()
            .oneshot(Request::builder().uri("/venues").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::LAST_MODIFIED],
            "Fri, 01 Mar 2024 12:30:05 GMT"
        );
    }

    #[test]
    fn requested_type_picks_last_type_pair() {
        let pairs = vec![
            ("type".to_string(), "Cafe".to_string()),
            ("city".to_string(), "NYC".to_string()),
            ("type".to_string(), "Bar".to_string()),
        ];
        assert_eq!(requested_type(pairs), Some("Bar".to_string()));
        assert_eq!(requested_type(Vec::new()), None);
    }

    #[tokio::test]
    async fn list_honours_if_none_match() {
        let app = make_app();
        let first = app
            .clone()
            .oneshot(Request::builder().uri("/venues").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let etag = first.headers()[header::ETAG].clone();

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/venues")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
        let bytes = second.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
