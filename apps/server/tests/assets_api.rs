use std::{path::Path, time::Duration};

use assetledger_server::{api::app_router, build_state, config::Config, config::LogFormat};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        log_format: LogFormat::Text,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config).unwrap(), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, name: &str, category: &str, value: f64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/assets",
        Some(json!({ "name": name, "category": category, "currentValue": value })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn healthz_works() {
    let (app, _tmp) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn asset_lifecycle_over_http() {
    let (app, _tmp) = test_app().await;
    let id = create(&app, "Car", "Vehicle", 20000.0).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/assets/{}/value", id),
        Some(json!({ "value": 18000.0, "notes": "depreciation" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentValue"].as_f64(), Some(18000.0));

    let (status, body) = send(&app, Method::POST, &format!("/api/v1/assets/{}/remove", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], json!(true));
    assert!(body["removedAt"].is_string());

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/assets/{}/value", id),
        Some(json!({ "value": 1.0, "notes": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!(409));

    let (status, body) = send(&app, Method::POST, &format!("/api/v1/assets/{}/restore", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], json!(false));
    assert!(body["removedAt"].is_null());

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/assets/{}/value", id),
        Some(json!({ "value": 17000.0, "notes": "post-restore" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, history) = send(&app, Method::GET, &format!("/api/v1/assets/{}/history", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["notes"], json!("post-restore"));
    assert_eq!(entries[2]["notes"], json!("Initial value"));
}

#[tokio::test]
async fn unknown_asset_returns_not_found() {
    let (app, _tmp) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/assets/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(404));

    let (status, _) = send(&app, Method::GET, "/api/v1/assets/999/history", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/v1/assets/999/restore", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_and_listing_skip_removed_assets() {
    let (app, _tmp) = test_app().await;
    create(&app, "Car", "Vehicle", 18000.0).await;
    create(&app, "Bike", "Vehicle", 5000.0).await;
    let old = create(&app, "Scooter", "Vehicle", 999.0).await;
    create(&app, "Print", "Art", 250.0).await;
    send(&app, Method::POST, &format!("/api/v1/assets/{}/remove", old), None).await;

    let (status, summary) = send(&app, Method::GET, "/api/v1/assets/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalValue"].as_f64(), Some(23250.0));
    assert_eq!(summary["totalCount"], json!(3));
    let vehicle = summary["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == json!("Vehicle"))
        .unwrap();
    assert_eq!(vehicle["count"], json!(2));
    assert_eq!(vehicle["totalValue"].as_f64(), Some(23000.0));

    let (_, active) = send(&app, Method::GET, "/api/v1/assets", None).await;
    assert_eq!(active.as_array().unwrap().len(), 3);

    let (_, all) = send(&app, Method::GET, "/api/v1/assets?includeRemoved=true", None).await;
    assert_eq!(all.as_array().unwrap().len(), 4);

    let (_, art) = send(&app, Method::GET, "/api/v1/assets?category=Art", None).await;
    let art = art.as_array().unwrap();
    assert_eq!(art.len(), 1);
    assert_eq!(art[0]["name"], json!("Print"));
}

#[tokio::test]
async fn removal_date_before_last_update_is_rejected() {
    let (app, _tmp) = test_app().await;
    let id = create(&app, "Painting", "Art", 1500.0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/assets/{}/remove", id),
        Some(json!({ "removalDate": "2000-01-01T00:00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));

    let (_, asset) = send(&app, Method::GET, &format!("/api/v1/assets/{}", id), None).await;
    assert_eq!(asset["removed"], json!(false));
}

#[tokio::test]
async fn details_update_keeps_value() {
    let (app, _tmp) = test_app().await;
    let id = create(&app, "House", "Property", 350000.0).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/assets/{}", id),
        Some(json!({ "name": "Beach house", "notes": "renovated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Beach house"));
    assert_eq!(body["category"], json!("Property"));
    assert_eq!(body["currentValue"].as_f64(), Some(350000.0));

    let (_, history) = send(&app, Method::GET, &format!("/api/v1/assets/{}/history", id), None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn backup_writes_a_copy_next_to_the_database() {
    let (app, tmp) = test_app().await;
    create(&app, "Car", "Vehicle", 20000.0).await;

    let (status, body) = send(&app, Method::POST, "/api/v1/utilities/database/backup", None).await;
    assert_eq!(status, StatusCode::OK);

    let path = body["path"].as_str().unwrap();
    assert!(Path::new(path).exists());
    assert!(Path::new(path).starts_with(tmp.path().join("backups")));
    assert!(body["filename"]
        .as_str()
        .unwrap()
        .starts_with("assetledger_backup_"));
}
