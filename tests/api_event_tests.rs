//! 活动与报名 API 集成测试

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_app, event_body, register_user, send};

#[tokio::test]
async fn test_create_event_uses_caller_as_organizer() {
    let (app, _) = create_test_app();
    let (olivia_id, token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;

    let mut body = event_body("RustConf");
    body["organizerId"] = json!(9999);

    let (status, event) = send(&app, "POST", "/api/events", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["organizerId"], olivia_id);
    assert_eq!(event["isPublic"], true);

    let (status, events) = send(
        &app,
        "GET",
        &format!("/api/events/organizer/{olivia_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_event_requires_token() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, "POST", "/api/events", None, Some(event_body("RustConf"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_event_validation() {
    let (app, _) = create_test_app();
    let (_, token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(&token),
        Some(json!({"title": "Only a title", "image": "not a url"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete_event() {
    let (app, _) = create_test_app();
    let (_, owner_token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;
    let (_, other_token) = register_user(&app, "Mallory", "mallory@example.com", "secret456").await;

    let (_, event) = send(
        &app,
        "POST",
        "/api/events",
        Some(&owner_token),
        Some(event_body("RustConf")),
    )
    .await;
    let uri = format!("/api/events/{}", event["id"]);

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&other_token),
        Some(json!({"title": "Pwned"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, unchanged) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, event);
}

#[tokio::test]
async fn test_owner_updates_and_deletes_event() {
    let (app, _) = create_test_app();
    let (_, token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;

    let (_, event) = send(&app, "POST", "/api/events", Some(&token), Some(event_body("RustConf"))).await;
    let uri = format!("/api/events/{}", event["id"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({"title": "RustConf 2026", "isPublic": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "RustConf 2026");
    assert_eq!(updated["location"], "Montreal");

    // 默认只列出公开活动
    let (_, public) = send(&app, "GET", "/api/events", None, None).await;
    assert!(public.as_array().unwrap().is_empty());
    let (_, all) = send(&app, "GET", "/api/events?publicOnly=false", None, None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_event_is_not_found() {
    let (app, _) = create_test_app();
    let (_, token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/events/4242",
        Some(&token),
        Some(json!({"title": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_flow() {
    let (app, _) = create_test_app();
    let (_, organizer_token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;
    let (jane_id, jane_token) = register_user(&app, "Jane Doe", "jane@example.com", "secret456").await;

    let (_, event) = send(
        &app,
        "POST",
        "/api/events",
        Some(&organizer_token),
        Some(event_body("Meetup")),
    )
    .await;
    let event_id = event["id"].as_i64().unwrap();

    let (status, registration) = send(
        &app,
        "POST",
        "/api/registrations",
        Some(&jane_token),
        Some(json!({
            "eventId": event_id,
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "ticketType": "General",
            "userId": 9999
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registration["userId"], jane_id);
    assert!(registration["registrationDate"].is_string());

    let registration_uri = format!("/api/registrations/{}", registration["id"]);
    let (status, fetched) = send(&app, "GET", &registration_uri, Some(&jane_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, registration);

    // 活动组织者也能查看报名
    let (status, _) = send(&app, "GET", &registration_uri, Some(&organizer_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let by_user_uri = format!("/api/registrations/user/{jane_id}");
    let (status, by_user) = send(&app, "GET", &by_user_uri, Some(&jane_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_user.as_array().unwrap().len(), 1);

    let by_event_uri = format!("/api/registrations/event/{event_id}");
    let (status, by_event) = send(&app, "GET", &by_event_uri, Some(&organizer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_event.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_registration_reads_are_private() {
    let (app, _) = create_test_app();
    let (_, organizer_token) = register_user(&app, "Olivia", "olivia@example.com", "secret123").await;
    let (jane_id, jane_token) = register_user(&app, "Jane Doe", "jane@example.com", "secret456").await;
    let (_, mallory_token) = register_user(&app, "Mallory", "mallory@example.com", "secret789").await;

    let (_, event) = send(
        &app,
        "POST",
        "/api/events",
        Some(&organizer_token),
        Some(event_body("Meetup")),
    )
    .await;
    let event_id = event["id"].as_i64().unwrap();

    let (_, registration) = send(
        &app,
        "POST",
        "/api/registrations",
        Some(&jane_token),
        Some(json!({
            "eventId": event_id,
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "ticketType": "General"
        })),
    )
    .await;

    let uris = [
        format!("/api/registrations/{}", registration["id"]),
        format!("/api/registrations/user/{jane_id}"),
        format!("/api/registrations/event/{event_id}"),
    ];
    for uri in &uris {
        let (status, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");

        let (status, body) = send(&app, "GET", uri, Some(&mallory_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert!(body.get("fullName").is_none());
    }

    // 报名人不能查看整个活动的报名名单
    let (status, _) = send(&app, "GET", &uris[2], Some(&jane_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_registration_for_missing_event() {
    let (app, _) = create_test_app();
    let (_, token) = register_user(&app, "Jane Doe", "jane@example.com", "secret123").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/registrations",
        Some(&token),
        Some(json!({
            "eventId": 77,
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "ticketType": "General"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Event not found");
}
