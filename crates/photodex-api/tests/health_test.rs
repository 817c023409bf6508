//! Probe, documentation and middleware integration tests.

mod helpers;

use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_checks_database() {
    let app = setup_test_app().await;

    let response = app.client().get("/ready").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "ready");
    assert_eq!(body["extractor"], "fixed");
}

#[tokio::test]
async fn test_readiness_fails_when_pool_closed() {
    let app = setup_test_app().await;
    app.pool().close().await;

    let response = app.client().get("/ready").await;
    assert_eq!(response.status_code(), 503);
    assert_eq!(response.json::<Value>()["status"], "not_ready");
}

#[tokio::test]
async fn test_openapi_lists_image_routes() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    response.assert_status_ok();

    let spec = response.json::<Value>();
    let paths = spec["paths"].as_object().unwrap();
    assert!(paths.contains_key("/images"));
    assert!(paths.contains_key("/images/{id}"));
    assert!(paths["/images/{id}"].get("patch").is_some());
    assert!(spec["components"]["schemas"].get("Image").is_some());
}

#[tokio::test]
async fn test_docs_page_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/docs").await;
    response.assert_status_ok();
    assert!(response.text().contains("/api/openapi.json"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app().await;

    let response = app.client().get("/images").await;
    assert!(!response
        .header(photodex_infra::REQUEST_ID_HEADER)
        .is_empty());

    let response = app
        .client()
        .get("/images/42")
        .add_header(photodex_infra::REQUEST_ID_HEADER, "abc-123")
        .await;
    assert_eq!(response.header(photodex_infra::REQUEST_ID_HEADER), "abc-123");
}
