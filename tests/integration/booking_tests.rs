//! Booking rule integration tests: overlap invariant, approval workflow,
//! authorization

use reqwest::Client;
use serde_json::{json, Value};

use crate::{api_tests::uuid_suffix, get_admin_token, get_token, BASE_URL};

async fn create_equipment(client: &Client, token: &str, requires_approval: bool) -> String {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": format!("Booking Test Rig {}", uuid_suffix()),
            "requires_approval": requires_approval
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No equipment ID").to_string()
}

async fn create_booking(
    client: &Client,
    token: &str,
    equipment_id: &str,
    start: &str,
    end: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_time": start,
            "end_time": end,
            "purpose": "integration test"
        }))
        .send()
        .await
        .expect("Failed to create booking")
}

/// Register a fresh user, approve it via the admin, and log it in
async fn approved_user_token(client: &Client, admin_token: &str) -> String {
    let email = format!("booker-{}@labtrack.local", uuid_suffix());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "booker-password",
            "full_name": "Booking Tester"
        }))
        .send()
        .await
        .expect("Failed to register");
    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["user"]["id"].as_str().expect("No user id").to_string();

    let response = client
        .post(format!("{}/users/approve", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to approve");
    assert!(response.status().is_success());

    get_token(client, &email, "booker-password").await
}

#[tokio::test]
#[ignore]
async fn test_booking_without_approval_is_confirmed() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "confirmed");
    assert_eq!(body["requires_approval"], false);
}

#[tokio::test]
#[ignore]
async fn test_booking_with_approval_starts_pending() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, true).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["requires_approval"], true);
}

#[tokio::test]
#[ignore]
async fn test_overlapping_booking_is_rejected() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);

    // [10:30, 11:30) overlaps [10:00, 11:00)
    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:30:00Z",
        "2030-05-01T11:30:00Z",
    )
    .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_adjacent_bookings_are_allowed() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);

    // [11:00, 12:00) is back-to-back with [10:00, 11:00): no conflict
    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T11:00:00Z",
        "2030-05-01T12:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_same_slot_on_different_equipment_is_allowed() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let first = create_equipment(&client, &token, false).await;
    let second = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &first,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = create_booking(
        &client,
        &token,
        &second,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_pending_booking_blocks_the_slot() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, true).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "pending");

    // A pending booking participates in the conflict set
    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:30:00Z",
        "2030-05-01T11:30:00Z",
    )
    .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_cancelled_booking_frees_the_slot() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .patch(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "reason": "freeing the slot" }))
        .send()
        .await
        .expect("Failed to cancel booking");
    assert!(response.status().is_success());

    // The former interval is immediately bookable again
    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_empty_interval_is_rejected() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T11:00:00Z",
        "2030-05-01T10:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_non_admin_cannot_confirm_booking() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let user_token = approved_user_token(&client, &admin_token).await;
    let equipment_id = create_equipment(&client, &admin_token, true).await;

    let response = create_booking(
        &client,
        &user_token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .patch(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_stranger_cannot_cancel_booking() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let owner_token = approved_user_token(&client, &admin_token).await;
    let stranger_token = approved_user_token(&client, &admin_token).await;
    let equipment_id = create_equipment(&client, &admin_token, false).await;

    let response = create_booking(
        &client,
        &owner_token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .patch(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", stranger_token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_admin_approval_flow() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &admin_token, true).await;

    let response = create_booking(
        &client,
        &admin_token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .patch(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "confirmed", "admin_notes": "approved" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "confirmed");
    assert!(body["booking"]["approved_by"].is_string());
    assert!(body["booking"]["approved_at"].is_string());

    // Confirming twice is an invalid transition
    let response = client
        .patch(format!("{}/bookings/{}/status", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_availability_returns_confirmed_in_range() {
    let client = Client::new();
    let token = get_admin_token(&client).await;
    let equipment_id = create_equipment(&client, &token, false).await;

    let response = create_booking(
        &client,
        &token,
        &equipment_id,
        "2030-05-01T10:00:00Z",
        "2030-05-01T11:00:00Z",
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!(
            "{}/bookings/equipment/{}/availability?start_date=2030-05-01T00:00:00Z&end_date=2030-05-02T00:00:00Z",
            BASE_URL, equipment_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let bookings = body.as_array().expect("Availability should be a list");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["status"], "confirmed");

    // A range entirely after the booking is empty
    let response = client
        .get(format!(
            "{}/bookings/equipment/{}/availability?start_date=2030-05-01T11:00:00Z&end_date=2030-05-02T00:00:00Z",
            BASE_URL, equipment_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.as_array().expect("Availability should be a list").is_empty());
}
