#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Route-level tests over the assembled router with an in-memory store.

use std::sync::Arc;

use {
    axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    },
    serde_json::{Value, json},
    tower::ServiceExt,
};

use {
    emberdash_config::EmberdashConfig,
    emberdash_gateway::server::{build_app, build_state_with_store},
    emberdash_store::MemoryKvStore,
};

fn app() -> Router {
    let config = EmberdashConfig::default();
    let state = build_state_with_store(&config, Arc::new(MemoryKvStore::new()));
    build_app(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_schedule_defaults() {
    let (status, body) = get_json(&app(), "/api/schedule").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["dayOfWeek"], 1);
    assert_eq!(body["timeOfDay"], "09:00");
    assert_eq!(body["percentage"], 9.0);
    assert!(body["nextScheduledMs"].as_u64().is_some());
}

#[tokio::test]
async fn test_schedule_patch_clamps_percentage() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/schedule",
        json!({ "enabled": true, "percentage": 99.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["percentage"], 50.0);

    // The change persisted.
    let (_, fetched) = get_json(&app, "/api/schedule").await;
    assert_eq!(fetched["percentage"], 50.0);
}

#[tokio::test]
async fn test_schedule_patch_rejects_bad_day() {
    let (status, body) = send_json(&app(), "PUT", "/api/schedule", json!({ "dayOfWeek": 9 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("day of week"));
}

#[tokio::test]
async fn test_schedule_run_not_due() {
    let (status, body) = send_json(&app(), "POST", "/api/schedule/run", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["executed"], false);
}

#[tokio::test]
async fn test_schedule_history_empty_then_cleared() {
    let app = app();
    let (status, body) = get_json(&app, "/api/schedule/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/schedule/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_schedule_status() {
    let (status, body) = get_json(&app(), "/api/schedule/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["running"], false);
    assert_eq!(body["enabled"], false);
}

#[tokio::test]
async fn test_wallet_lifecycle() {
    let app = app();

    let (status, wallet) = send_json(
        &app,
        "POST",
        "/api/wallets",
        json!({
            "address": "0x00000000000000000000000000000000000000aa",
            "label": "Main",
            "kind": "manual",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = wallet["id"].as_str().unwrap().to_string();

    let (_, wallets) = get_json(&app, "/api/wallets").await;
    assert_eq!(wallets.as_array().unwrap().len(), 1);

    let (status, updated) =
        send_json(&app, "PUT", &format!("/api/wallets/{id}/balance"), json!({
            "balance": "2.5"
        }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["balance"], "2.5");

    let (_, total) = get_json(&app, "/api/wallets/total").await;
    assert_eq!(total["total"], "2.5000");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/wallets/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wallet_invalid_address_is_400() {
    let (status, body) = send_json(
        &app(),
        "POST",
        "/api/wallets",
        json!({ "address": "0x123", "label": "bad", "kind": "manual" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid"));
}

#[tokio::test]
async fn test_expense_add_and_summary() {
    let app = app();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/expenses",
        json!({
            "amount": 12.5,
            "category": "food",
            "description": "Lunch",
            "date": "2026-08-06T12:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, summary) = get_json(&app, "/api/expenses/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 12.5);
    assert_eq!(summary["byCategory"][0]["category"], "food");
}

#[tokio::test]
async fn test_expense_categories() {
    let (status, body) = get_json(&app(), "/api/expenses/categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert!(categories.iter().any(|c| c["id"] == "food"));
}

#[tokio::test]
async fn test_expense_bad_date_is_400() {
    let (status, _) = send_json(
        &app(),
        "POST",
        "/api/expenses",
        json!({
            "amount": 1.0,
            "category": "food",
            "description": "x",
            "date": "yesterday",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_price_invalid_pair_is_400() {
    let (status, _) = get_json(&app(), "/api/prices/BTCUSD").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
