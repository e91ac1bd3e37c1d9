//! Router tests that never reach the database
//!
//! The pool is created lazily, so only requests rejected before any query
//! are exercised here.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use salon_booking_server::{
    api,
    config::AppConfig,
    models::CustomerClaims,
    repository::Repository,
    services::{clock::SystemClock, Services},
    AppState,
};

fn app() -> Router {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    let services = Services::new(
        Repository::new(pool),
        config.scheduling.clone(),
        Arc::new(SystemClock),
    );
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

fn bearer(customer_id: &str) -> String {
    let claims = CustomerClaims {
        sub: customer_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    let token = claims
        .to_token(&AppConfig::default().auth.jwt_secret)
        .unwrap();
    format!("Bearer {}", token)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app()
        .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/salons/{id}/availability"].is_object());
}

#[tokio::test]
async fn test_booking_requires_token() {
    let response = app()
        .oneshot(
            Request::post("/api/v1/bookings")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "salon_id": 1 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_token_subject_must_be_customer_id() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/bookings/me")
                .header(header::AUTHORIZATION, bearer("admin"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_without_date_names_missing_field() {
    let response = app()
        .oneshot(
            Request::post("/api/v1/bookings")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, bearer("42"))
                .body(
                    Body::from(
                        json!({ "salon_id": 1, "start_time": "10:00", "service_ids": [3] }).to_string(),
                    ),
                )
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "MissingField");
    assert_eq!(body["field"], "date");
}

#[tokio::test]
async fn test_availability_rejects_malformed_date() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/salons/1/availability?date=03.06.2026")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "BadValue");
}
