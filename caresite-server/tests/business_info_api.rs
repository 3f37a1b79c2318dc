//! Business info lifecycle: lazy read, single-shot create, partial update,
//! publish

mod common;

use http::StatusCode;
use serde_json::json;

use common::{access_token, request, signup, spawn_app};

#[tokio::test]
async fn first_read_auto_creates_empty_draft() {
    let t = spawn_app().await;
    let body = signup(&t.app, "fresh@example.com", "hospital").await;
    let token = access_token(&body);

    let (status, info) = request(&t.app, "GET", "/api/business-info/mine", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["name"], "");
    assert_eq!(info["about"], "");
    assert_eq!(info["working_hours"], json!({}));
    assert_eq!(info["is_published"], false);
    assert_eq!(info["latitude"], serde_json::Value::Null);
}

#[tokio::test]
async fn create_is_single_shot() {
    let t = spawn_app().await;
    let body = signup(&t.app, "once@example.com", "pharmacy").await;
    let token = access_token(&body);

    let (status, info) = request(
        &t.app,
        "POST",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({ "name": "City Pharmacy", "about": "Open late" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(info["name"], "City Pharmacy");
    assert_eq!(info["is_published"], false);

    let (status, err) = request(
        &t.app,
        "POST",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({ "name": "Another Name" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "Business info already exists. Use update endpoint.");

    // The original record is untouched
    let (_, info) = request(&t.app, "GET", "/api/business-info/mine", Some(&token), None).await;
    assert_eq!(info["name"], "City Pharmacy");
}

#[tokio::test]
async fn partial_update_keeps_unspecified_fields() {
    let t = spawn_app().await;
    let body = signup(&t.app, "partial@example.com", "hospital").await;
    let token = access_token(&body);

    let (_, _) = request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({
            "name": "General Hospital",
            "about": "Emergency care around the clock",
            "latitude": 30.05,
            "longitude": 31.23,
        })),
    )
    .await;

    let (status, info) = request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({ "contact_phone": "+1234567890" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["contact_phone"], "+1234567890");
    assert_eq!(info["name"], "General Hospital");
    assert_eq!(info["about"], "Emergency care around the clock");
    assert_eq!(info["latitude"], 30.05);
}

#[tokio::test]
async fn update_validation_reports_all_violations() {
    let t = spawn_app().await;
    let body = signup(&t.app, "invalid@example.com", "hospital").await;
    let token = access_token(&body);

    let (status, err) = request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({
            "contact_email": "not-an-email",
            "website": "not a url",
            "latitude": 200.0,
            "working_hours": { "funday": { "closed": true } },
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = err["details"].as_object().expect("details map");
    assert!(details.contains_key("contact_email"));
    assert!(details.contains_key("website"));
    assert!(details.contains_key("latitude"));
    assert!(details.contains_key("working_hours"));

    // Nothing was persisted
    let (_, info) = request(&t.app, "GET", "/api/business-info/mine", Some(&token), None).await;
    assert_eq!(info["contact_email"], "");
    assert_eq!(info["latitude"], serde_json::Value::Null);
}

#[tokio::test]
async fn working_hours_survive_a_round_trip() {
    let t = spawn_app().await;
    let body = signup(&t.app, "hours@example.com", "pharmacy").await;
    let token = access_token(&body);

    let hours = json!({
        "monday": { "open": "09:00", "close": "18:00", "closed": false },
        "sunday": { "open": null, "close": null, "closed": true },
    });
    let (status, info) = request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({ "working_hours": hours })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["working_hours"]["monday"]["open"], "09:00");

    let (_, info) = request(&t.app, "GET", "/api/business-info/mine", Some(&token), None).await;
    assert_eq!(info["working_hours"]["monday"]["close"], "18:00");
    assert_eq!(info["working_hours"]["sunday"]["closed"], true);
}

#[tokio::test]
async fn publish_is_idempotent_and_not_implied_by_updates() {
    let t = spawn_app().await;
    let body = signup(&t.app, "pub@example.com", "hospital").await;
    let token = access_token(&body);

    // Field updates never publish
    let (_, info) = request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({ "name": "Clinic", "is_published": true })),
    )
    .await;
    assert_eq!(info["is_published"], false);

    // Publish flips the flag, with no completeness precondition
    let (status, info) = request(
        &t.app,
        "POST",
        "/api/business-info/mine/publish",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["is_published"], true);

    // Republishing succeeds and changes nothing
    let (status, info) = request(
        &t.app,
        "POST",
        "/api/business-info/mine/publish",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["is_published"], true);

    // Later field updates leave it published
    let (_, info) = request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token),
        Some(json!({ "about": "Updated copy" })),
    )
    .await;
    assert_eq!(info["is_published"], true);
}

#[tokio::test]
async fn publish_on_fresh_account_creates_then_publishes() {
    let t = spawn_app().await;
    let body = signup(&t.app, "eager@example.com", "pharmacy").await;
    let token = access_token(&body);

    // No prior GET/POST: publish lazily creates the draft first
    let (status, info) = request(
        &t.app,
        "POST",
        "/api/business-info/mine/publish",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["is_published"], true);
    assert_eq!(info["name"], "");
}

#[tokio::test]
async fn accounts_are_isolated_from_each_other() {
    let t = spawn_app().await;
    let first = signup(&t.app, "one@example.com", "hospital").await;
    let second = signup(&t.app, "two@example.com", "pharmacy").await;

    let token_first = access_token(&first);
    let token_second = access_token(&second);

    request(
        &t.app,
        "PUT",
        "/api/business-info/mine",
        Some(&token_first),
        Some(json!({ "name": "First Clinic" })),
    )
    .await;

    let (_, info) =
        request(&t.app, "GET", "/api/business-info/mine", Some(&token_second), None).await;
    assert_eq!(info["name"], "");
    assert_eq!(info["setup_id"], second["website_setup_id"]);
}
