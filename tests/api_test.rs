//! HTTP tests driving the full router on the in-memory backend.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, client, id_of};

const DAY: &str = "2030-06-03";

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/api/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["database"], "memory");
}

#[tokio::test]
async fn test_missing_actor_headers_are_rejected() {
    let app = TestApp::new().await;
    let res = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "barberId": app.barber_id,
                "serviceId": app.service_id,
                "timeSlot": "2030-06-03T10:00:00Z",
            })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "AUTHENTICATION");

    let res = app
        .request(
            "GET",
            &format!("/api/bookings/{}", Uuid::new_v4()),
            None,
            Some((Uuid::new_v4(), "stylist")),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_booking_returns_booking_shape() {
    let app = TestApp::new().await;
    let res = app.book("2030-06-03T10:00:00Z").await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);

    let booking = &res.body["booking"];
    for field in [
        "_id",
        "bookingId",
        "status",
        "timeSlot",
        "amountTotal",
        "depositPaid",
        "balanceRemaining",
        "paymentStatus",
        "paymentMethod",
        "clientId",
        "barberId",
        "salonId",
        "serviceId",
    ] {
        assert!(!booking[field].is_null(), "missing {field}");
    }
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["timeSlot"], "2030-06-03T10:00:00Z");
    assert_eq!(booking["barberId"], app.barber_id.to_string());
    assert!(booking["bookingId"].as_str().unwrap().starts_with("BK"));

    let total = booking["amountTotal"].as_i64().unwrap();
    let deposit = booking["depositPaid"].as_i64().unwrap();
    assert_eq!(total, 5000);
    assert_eq!(booking["balanceRemaining"].as_i64().unwrap(), total - deposit);
    assert_eq!(booking["paymentStatus"], "partial");
    assert_eq!(booking["paymentMethod"], "airtel");
}

#[tokio::test]
async fn test_double_booking_conflicts() {
    let app = TestApp::new().await;
    assert_eq!(app.book("2030-06-03T14:00:00Z").await.status, StatusCode::CREATED);

    let res = app.book("2030-06-03T14:00:00Z").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "CONFLICT");

    let res = app.book("2030-06-03T14:15:00Z").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booking_past_closing_is_out_of_hours() {
    let app = TestApp::new().await;
    let res = app.book("2030-06-03T16:45:00Z").await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["error"], "OUT_OF_HOURS");
}

#[tokio::test]
async fn test_unknown_barber_is_not_found() {
    let app = TestApp::new().await;
    let res = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "barberId": Uuid::new_v4(),
                "serviceId": app.service_id,
                "timeSlot": "2030-06-03T10:00:00Z",
            })),
            Some(client()),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = TestApp::new().await;
    let res = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({ "barberId": "not-a-uuid" })),
            Some(client()),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_malformed_query_and_path_are_validation_errors() {
    let app = TestApp::new().await;
    let bad_date = format!(
        "/api/availability/{}?date=2030-13-45&serviceId={}",
        app.barber_id, app.service_id
    );
    let missing_service = format!("/api/availability/{}?date={DAY}", app.barber_id);

    for path in [bad_date.as_str(), missing_service.as_str(), "/api/bookings/not-a-uuid"] {
        let res = app.request("GET", path, None, Some(client())).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(res.body["error"], "VALIDATION", "{path}");
        assert!(res.body["message"].is_string(), "{path}");
    }

    let res = app
        .request("GET", "/api/bookings?status=lost", None, Some(app.owner()))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_slots_follow_bookings_and_cancellation() {
    let app = TestApp::new().await;
    assert_eq!(app.slots(DAY).await.len(), 16);

    let res = app.book("2030-06-03T10:00:00Z").await;
    let booking_id = id_of(&res.body["booking"]);
    let res = app
        .request(
            "PATCH",
            &format!("/api/bookings/{booking_id}/status"),
            Some(json!({ "status": "confirmed" })),
            Some(app.barber()),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
    assert_eq!(res.body["booking"]["status"], "confirmed");

    let slots = app.slots(DAY).await;
    assert_eq!(slots.len(), 15);
    assert!(!slots.contains(&"2030-06-03T10:00:00Z".to_string()));
    assert!(slots.contains(&"2030-06-03T09:30:00Z".to_string()));
    assert!(slots.contains(&"2030-06-03T10:30:00Z".to_string()));

    let res = app
        .request(
            "PATCH",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(app.owner()),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["booking"]["status"], "cancelled");
    assert_eq!(app.slots(DAY).await.len(), 16);
}

#[tokio::test]
async fn test_terminal_booking_rejects_transition() {
    let app = TestApp::new().await;
    let booking_id = id_of(&app.book("2030-06-03T11:00:00Z").await.body["booking"]);
    let path = format!("/api/bookings/{booking_id}/status");

    let res = app
        .request("PATCH", &path, Some(json!({ "status": "cancelled" })), Some(app.owner()))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .request("PATCH", &path, Some(json!({ "status": "confirmed" })), Some(app.owner()))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_blocked_slot_disappears_and_returns() {
    let app = TestApp::new().await;
    let block_path = format!("/api/availability/{}/block", app.barber_id);
    let body = json!({ "slots": ["2030-06-03T12:00:00Z"] });

    let res = app
        .request("POST", &block_path, Some(body.clone()), Some(client()))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .request("POST", &block_path, Some(body.clone()), Some(app.barber()))
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    assert_eq!(res.body["blocked"].as_array().unwrap().len(), 1);
    assert!(!app.slots(DAY).await.contains(&"2030-06-03T12:00:00Z".to_string()));
    assert_eq!(app.book("2030-06-03T12:00:00Z").await.status, StatusCode::CONFLICT);

    let busy = app
        .request(
            "GET",
            &format!("/api/availability/{}/busy?date={DAY}", app.barber_id),
            None,
            Some(app.barber()),
        )
        .await;
    assert_eq!(busy.body["busy"][0]["start"], "2030-06-03T12:00:00Z");
    assert_eq!(busy.body["busy"][0]["end"], "2030-06-03T12:30:00Z");

    let res = app
        .request(
            "POST",
            &format!("/api/availability/{}/unblock", app.barber_id),
            Some(body),
            Some(app.barber()),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["removed"], 1);
    assert_eq!(app.slots(DAY).await.len(), 16);
}

#[tokio::test]
async fn test_client_sees_only_own_bookings() {
    let app = TestApp::new().await;
    let alice = client();
    let res = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "barberId": app.barber_id,
                "serviceId": app.service_id,
                "timeSlot": "2030-06-03T09:00:00Z",
                "paymentOption": "cash",
            })),
            Some(alice),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let alice_booking = id_of(&res.body["booking"]);
    app.book("2030-06-03T09:30:00Z").await;

    let res = app.request("GET", "/api/bookings", None, Some(alice)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["items"].as_array().unwrap().len(), 1);

    let res = app
        .request("GET", &format!("/api/bookings/{alice_booking}"), None, Some(client()))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .request(
            "GET",
            &format!("/api/bookings?salonId={}&date={DAY}", app.salon_id),
            None,
            Some(app.owner()),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["items"].as_array().unwrap().len(), 2);
}
