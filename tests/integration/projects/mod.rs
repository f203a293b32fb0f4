//! Project record endpoint tests

use axum::http::{Method, StatusCode};
use edio_auth::UserRole;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{create_test_jwt, jwt_for, parse_body, request, TestApp};

#[tokio::test]
async fn test_youtuber_creates_idle_project() {
    let app = TestApp::new();
    let owner = app.create_test_user(UserRole::Youtuber).await;

    let response = app
        .router()
        .oneshot(request(
            Method::POST,
            "/api/projects",
            Some(&jwt_for(&owner)),
            Some(json!({"title": "  Launch video  ", "description": "Teaser cut"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    assert_eq!(body["title"], "Launch video");
    assert_eq!(body["owner_id"], owner.id.to_string());
    assert_eq!(body["publishing_status"], "idle");
}

#[tokio::test]
async fn test_editor_cannot_create_project() {
    let app = TestApp::new();
    let editor = app.create_test_user(UserRole::Editor).await;

    let response = app
        .router()
        .oneshot(request(
            Method::POST,
            "/api/projects",
            Some(&jwt_for(&editor)),
            Some(json!({"title": "Nope"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_overlong_title_is_rejected() {
    let app = TestApp::new();
    let owner = app.create_test_user(UserRole::Youtuber).await;

    let response = app
        .router()
        .oneshot(request(
            Method::POST,
            "/api/projects",
            Some(&jwt_for(&owner)),
            Some(json!({"title": "x".repeat(201)})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_returns_only_own_projects() {
    let app = TestApp::new();
    let owner = app.create_test_user(UserRole::Youtuber).await;
    let other = app.create_test_user(UserRole::Youtuber).await;
    app.create_test_project(&owner).await.unwrap();
    app.create_test_project(&owner).await.unwrap();
    app.create_test_project(&other).await.unwrap();

    let response = app
        .router()
        .oneshot(request(
            Method::GET,
            "/api/projects",
            Some(&jwt_for(&owner)),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items
        .iter()
        .all(|p| p["owner_id"] == owner.id.to_string()));
}

#[tokio::test]
async fn test_get_project_and_missing_project() {
    let app = TestApp::new();
    let owner = app.create_test_user(UserRole::Youtuber).await;
    let project = app.create_test_project(&owner).await.unwrap();
    let jwt = jwt_for(&owner);

    let response = app
        .router()
        .oneshot(request(
            Method::GET,
            &format!("/api/projects/{}", project.id),
            Some(&jwt),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["id"], project.id.to_string());

    let response = app
        .router()
        .oneshot(request(
            Method::GET,
            &format!("/api/projects/{}", Uuid::new_v4()),
            Some(&jwt),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_first_request_provisions_user_from_token() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let jwt = create_test_jwt(user_id, Some("new@edio.test"), Some(UserRole::Youtuber)).unwrap();

    let response = app
        .router()
        .oneshot(request(
            Method::POST,
            "/api/projects",
            Some(&jwt),
            Some(json!({"title": "First upload"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.identities.len().await, 1);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let app = TestApp::new();
    let owner = app.create_test_user(UserRole::Youtuber).await;

    let response = app
        .router()
        .oneshot(request(
            Method::POST,
            "/api/projects",
            Some(&jwt_for(&owner)),
            Some(json!({"title": "Big", "description": "d".repeat(70 * 1024)})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
