//! Integration tests against a running server
//!
//! Run with: cargo test -- --ignored
//! Requires a live server (see config/default.toml) and an approved admin
//! account, configured via LABTRACK_TEST_ADMIN_EMAIL / _PASSWORD.

mod api_tests;
mod booking_tests;

use reqwest::Client;
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://localhost:8080/api/v1";

pub fn admin_credentials() -> (String, String) {
    let email = std::env::var("LABTRACK_TEST_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@labtrack.local".to_string());
    let password =
        std::env::var("LABTRACK_TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "admin-password".to_string());
    (email, password)
}

/// Log in and return a bearer token
pub async fn get_token(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to get an admin token
pub async fn get_admin_token(client: &Client) -> String {
    let (email, password) = admin_credentials();
    get_token(client, &email, &password).await
}
