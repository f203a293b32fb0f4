//! Publishing-status endpoint tests

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use edio_auth::UserRole;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{jwt_for, parse_body, request, TestApp};

fn status_uri(id: impl std::fmt::Display) -> String {
    format!("/api/projects/{}/publish/status", id)
}

mod get_status {
    use super::*;

    #[tokio::test]
    async fn test_new_project_is_idle() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();

        let response = app
            .router()
            .oneshot(request(Method::GET, &status_uri(project.id), None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_body(response).await, json!({"status": "idle"}));
    }

    #[tokio::test]
    async fn test_unknown_project_is_404() {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(request(Method::GET, &status_uri(Uuid::new_v4()), None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            parse_body(response).await,
            json!({"error": "Project not found"})
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(request(Method::GET, &status_uri("not-a-uuid"), None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            parse_body(response).await,
            json!({"error": "Invalid project id"})
        );
    }

    #[tokio::test]
    async fn test_store_outage_is_500_with_fetch_message() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();
        app.store.set_unavailable(true);

        let response = app
            .router()
            .oneshot(request(Method::GET, &status_uri(project.id), None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            parse_body(response).await,
            json!({"error": "Failed to fetch publishing status"})
        );
    }
}

mod update_status {
    use super::*;

    async fn post_status(
        app: &TestApp,
        jwt: &str,
        id: Uuid,
        body: serde_json::Value,
    ) -> axum::http::Response<axum::body::Body> {
        app.router()
            .oneshot(request(Method::POST, &status_uri(id), Some(jwt), Some(body)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_publish_then_fail_then_retry() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();
        let jwt = jwt_for(&owner);

        let response = post_status(&app, &jwt, project.id, json!({"status": "publishing"})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_body(response).await, json!({"status": "publishing"}));

        let response = post_status(&app, &jwt, project.id, json!({"status": "failed"})).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = post_status(&app, &jwt, project.id, json!({"event": "retry"})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_body(response).await, json!({"status": "publishing"}));

        let response = post_status(&app, &jwt, project.id, json!({"event": "succeed"})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_body(response).await, json!({"status": "completed"}));

        let response = app
            .router()
            .oneshot(request(Method::GET, &status_uri(project.id), None, None))
            .await
            .unwrap();
        assert_eq!(parse_body(response).await, json!({"status": "completed"}));
    }

    #[tokio::test]
    async fn test_skipping_publishing_is_409_and_leaves_status() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();
        let jwt = jwt_for(&owner);

        let response = post_status(&app, &jwt, project.id, json!({"status": "completed"})).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = parse_body(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("idle"));
        assert!(message.contains("completed"));

        let response = app
            .router()
            .oneshot(request(Method::GET, &status_uri(project.id), None, None))
            .await
            .unwrap();
        assert_eq!(parse_body(response).await, json!({"status": "idle"}));
    }

    #[tokio::test]
    async fn test_completed_is_terminal() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();
        let jwt = jwt_for(&owner);

        for status in ["publishing", "completed"] {
            let response = post_status(&app, &jwt, project.id, json!({ "status": status })).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        for status in ["idle", "publishing", "failed"] {
            let response = post_status(&app, &jwt, project.id, json!({ "status": status })).await;
            assert_eq!(response.status(), StatusCode::CONFLICT, "completed -> {}", status);
        }
    }

    #[tokio::test]
    async fn test_unknown_status_value_is_400() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();

        let response = post_status(
            &app,
            &jwt_for(&owner),
            project.id,
            json!({"status": "archived"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();

        let response = app
            .router()
            .oneshot(request(
                Method::POST,
                &status_uri(project.id),
                None,
                Some(json!({"status": "publishing"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_editor_is_forbidden() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let editor = app.create_test_user(UserRole::Editor).await;
        let project = app.create_test_project(&owner).await.unwrap();

        let response = post_status(
            &app,
            &jwt_for(&editor),
            project.id,
            json!({"status": "publishing"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_other_youtuber_sees_404() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let stranger = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();

        let response = post_status(
            &app,
            &jwt_for(&stranger),
            project.id,
            json!({"status": "publishing"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            app.state.tracker.get_status(project.id).await.unwrap(),
            edio_projects::PublishingStatus::Idle
        );
    }

    #[tokio::test]
    async fn test_store_outage_is_500_with_update_message() {
        let app = TestApp::new();
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();
        app.store.set_unavailable(true);

        let response = post_status(
            &app,
            &jwt_for(&owner),
            project.id,
            json!({"status": "publishing"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            parse_body(response).await,
            json!({"error": "Failed to update publishing status"})
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_publish_requests_have_one_winner() {
        let app = Arc::new(TestApp::new());
        let owner = app.create_test_user(UserRole::Youtuber).await;
        let project = app.create_test_project(&owner).await.unwrap();
        let jwt = jwt_for(&owner);
        let id = project.id;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let app = app.clone();
            let jwt = jwt.clone();
            handles.push(tokio::spawn(async move {
                post_status(&app, &jwt, id, json!({"status": "publishing"}))
                    .await
                    .status()
            }));
        }

        let mut ok = 0;
        let mut conflict = 0;
        for handle in handles {
            match handle.await.unwrap() {
                StatusCode::OK => ok += 1,
                StatusCode::CONFLICT => conflict += 1,
                other => panic!("unexpected status {}", other),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(conflict, 7);
    }
}
