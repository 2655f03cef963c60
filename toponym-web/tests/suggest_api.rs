use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use toponym_core::gazetteer::GazetteerSource;
use toponym_web::app;

fn fixture() -> GazetteerSource {
    GazetteerSource::new(
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../toponym-core/tests/data/ottoman_locations.csv"),
    )
}

async fn call(source: GazetteerSource, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(source).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(source: GazetteerSource, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/find_location_suggestions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    call(source, request).await
}

fn suggestions(body: &Value) -> Vec<&str> {
    body["suggestions"]
        .as_array()
        .expect("suggestions array")
        .iter()
        .map(|s| s.as_str().expect("string suggestion"))
        .collect()
}

#[tokio::test]
async fn suggests_closest_names() {
    let cases = [
        ("Istambol", "istanbul"),
        ("Istambul", "istanbul"),
        ("Angora", "ankara"),
    ];
    for (location_name, expected) in cases {
        let body = json!({ "location_name": location_name }).to_string();
        let (status, body) = post(fixture(), body).await;
        assert_eq!(status, StatusCode::OK);
        let suggestions = suggestions(&body);
        assert_eq!(suggestions.len(), 25);
        assert_eq!(suggestions[0], expected);
    }
}

#[tokio::test]
async fn suffix_is_reattached() {
    let body = json!({ "location_name": "Edirne Vilayeti" }).to_string();
    let (status, body) = post(fixture(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(suggestions(&body)[0], "edirne vilayeti");
}

#[tokio::test]
async fn placeholders_get_sentinel() {
    for body in [
        json!({ "location_name": "Not specified" }),
        json!({ "location_name": "" }),
        json!({ "location_name": "12345" }),
        json!({ "location_name": null }),
        json!({}),
    ] {
        let (status, body) = post(fixture(), body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "suggestions": ["No suggestion."] }));
    }
}

#[tokio::test]
async fn invalid_json_is_a_client_error() {
    for body in ["{location_name: Istanbul", "", "[1, 2]", r#"{"location_name": 7}"#] {
        let (status, body) = post(fixture(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid JSON" }));
    }
}

#[tokio::test]
async fn unreadable_gazetteer_is_unavailable() {
    let source = GazetteerSource::new("/nonexistent/ottoman_locations.csv");
    let body = json!({ "location_name": "Konya" }).to_string();
    let (status, body) = post(source.clone(), body).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("gazetteer unavailable"));

    // no gazetteer is needed to answer a query without signal
    let body = json!({ "location_name": "Not specified" }).to_string();
    let (status, _) = post(source, body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn schema_describes_suggestions() {
    let request = Request::builder()
        .uri("/find_location_suggestions/schema")
        .body(Body::empty())
        .unwrap();
    let (status, schema) = call(fixture(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema["title"], "SuggestResults");
    assert_eq!(schema["properties"]["suggestions"]["type"], "array");
}
