//! API integration tests against a running server with a seeded database
//!
//! Expects salon 1 with service 1 and the default JWT secret.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use salon_booking_server::{config::AppConfig, models::CustomerClaims};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to build a bearer token for a customer
fn auth_token(customer_id: i32) -> String {
    CustomerClaims {
        sub: customer_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    }
    .to_token(&AppConfig::default().auth.jwt_secret)
    .expect("Failed to encode token")
}

fn tomorrow() -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_ready_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_availability_lists_slots() {
    let client = Client::new();

    let response = client
        .get(format!("{}/salons/1/availability", BASE_URL))
        .query(&[("date", tomorrow().as_str()), ("service_ids", "1")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["slots"].is_array());
    assert!(body["total_duration_minutes"].as_i64().unwrap() > 0);
}

#[tokio::test]
#[ignore]
async fn test_double_booking_is_rejected() {
    let client = Client::new();

    let availability: Value = client
        .get(format!("{}/salons/1/availability", BASE_URL))
        .query(&[("date", tomorrow().as_str()), ("service_ids", "1")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let start = availability["chosen"]
        .as_str()
        .expect("No available slot tomorrow")
        .to_string();

    let payload = json!({
        "salon_id": 1,
        "date": tomorrow(),
        "start_time": start,
        "service_ids": [1]
    });

    let first = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(auth_token(1001))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::CREATED);
    let booking: Value = first.json().await.expect("Failed to parse response");

    let second = client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(auth_token(1002))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // free the slot again
    let cancelled = client
        .delete(format!("{}/bookings/{}", BASE_URL, booking["id"]))
        .bearer_auth(auth_token(1001))
        .send()
        .await
        .expect("Failed to send request");
    assert!(cancelled.status().is_success());
}
