//! API integration tests: the full router over an in-process service

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use realty_site::server::router;
use realty_site::store::Store;
use realty_site::Site;

/// Build a router backed by a fresh temp directory
fn test_app() -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let site = Site::new(tmp.path()).unwrap();
    let store = Store::open(&site.data_dir).unwrap();
    (router(site, store), tmp)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_returns_banner() {
    let (app, _tmp) = test_app();
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("API"));
}

#[tokio::test]
async fn unknown_route_is_404_with_path_in_body() {
    let (app, _tmp) = test_app();
    let (status, body) = get(&app, "/unknown-route").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route /unknown-route not found");
}

#[tokio::test]
async fn contact_missing_phone_is_400() {
    let (app, _tmp) = test_app();
    let (status, body) = post(
        &app,
        "/contact",
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "address": "1 Analytical Way",
            "agreeToTerms": true,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");
}

#[tokio::test]
async fn contact_without_terms_is_400() {
    let (app, _tmp) = test_app();
    let (status, body) = post(
        &app,
        "/contact",
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Analytical Way",
            "agreeToTerms": false,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You must agree to the terms and conditions");
}

#[tokio::test]
async fn contact_round_trip() {
    let (app, _tmp) = test_app();
    let (status, body) = post(
        &app,
        "/contact",
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Analytical Way",
            "agreeToTerms": true,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, leads) = get(&app, "/contact").await;
    assert_eq!(status, StatusCode::OK);
    let leads = leads.as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["id"], id.as_str());
    assert_eq!(leads[0]["name"], "Ada Lovelace");
    assert_eq!(leads[0]["status"], "new");
    // The store's internal envelope never reaches the wire
    assert!(leads[0].get("_seq").is_none());
}

#[tokio::test]
async fn status_requires_client_name() {
    let (app, _tmp) = test_app();
    let (status, body) = post(&app, "/status", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "client_name is required");
}

#[tokio::test]
async fn status_round_trip() {
    let (app, _tmp) = test_app();
    let (status, body) = post(&app, "/status", json!({ "client_name": "probe" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client_name"], "probe");
    assert!(body["timestamp"].as_str().is_some());
    let id = body["id"].as_str().unwrap().to_string();

    let (status, checks) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK);
    let checks = checks.as_array().unwrap();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0]["id"], id.as_str());
    assert!(checks[0].get("_seq").is_none());
}

#[tokio::test]
async fn properties_endpoint_serves_listings() {
    let tmp = tempfile::tempdir().unwrap();
    let site = Site::new(tmp.path()).unwrap();
    std::fs::create_dir_all(&site.content_dir).unwrap();
    std::fs::write(
        site.content_dir.join("riverside.md"),
        "---\ntitle: Riverside Apartments\ndate: \"2024-03-01\"\nunits: 24\n---\n# Overview\n\nA 24-unit community.",
    )
    .unwrap();
    let store = Store::open(&site.data_dir).unwrap();
    let app = router(site, store);

    let (status, body) = get(&app, "/properties").await;
    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["slug"], "riverside");
    assert_eq!(listings[0]["units"], 24);
    assert!(listings[0]["contentHtml"]
        .as_str()
        .unwrap()
        .contains("<h1>Overview</h1>"));

    let (status, listing) = get(&app, "/properties/riverside").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["title"], "Riverside Apartments");

    let (status, body) = get(&app, "/properties/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property nowhere not found");
}
