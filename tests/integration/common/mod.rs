//! Common test utilities and fixtures for integration tests
//!
//! - In-memory application setup
//! - Session token helpers
//! - User and project fixtures
//! - Request/response helpers

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use chrono::Utc;
use edio_auth::{AuthBackend, AuthConfig, AuthIdentity, InMemoryIdentityProvider, UserRole};
use edio_projects::{InMemoryProjectStore, Project, ProjectStore, ProjectsState};
use serde_json::Value;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only"; // pragma: allowlist secret

/// Application wired to in-memory ports
pub struct TestApp {
    pub identities: Arc<InMemoryIdentityProvider>,
    pub store: Arc<InMemoryProjectStore>,
    pub state: ProjectsState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(2))
    }

    pub fn with_timeout(store_timeout: Duration) -> Self {
        let identities = Arc::new(InMemoryIdentityProvider::new());
        let store = Arc::new(InMemoryProjectStore::new());

        let auth = AuthBackend::new(
            identities.clone(),
            AuthConfig {
                jwt_secret: TEST_JWT_SECRET.to_string(),
                issuer: None,
                audience: Some("authenticated".to_string()),
            },
        );
        let state = ProjectsState::new(store.clone(), auth, store_timeout);

        Self {
            identities,
            store,
            state,
        }
    }

    /// Fresh router over the shared state
    pub fn router(&self) -> Router {
        edio_app::build_router(self.state.clone())
    }

    pub async fn create_test_user(&self, role: UserRole) -> AuthIdentity {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let user = AuthIdentity {
            id,
            email: format!("test_{}@edio.test", id.simple()),
            name: Some(format!("Test User {}", &id.to_string()[0..8])),
            role,
            created_at: now,
            updated_at: now,
        };
        self.identities.insert(user.clone()).await;
        user
    }

    pub async fn create_test_project(&self, owner: &AuthIdentity) -> Result<Project> {
        let project = Project::new(owner.id, "Test Project".to_string(), None)?;
        Ok(self.store.create(&project).await?)
    }
}

/// Sign a session token for `user_id`
pub fn create_test_jwt(
    user_id: Uuid,
    email: Option<&str>,
    role: Option<UserRole>,
) -> Result<String> {
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    let now = Utc::now().timestamp() as u64;
    let mut claims = serde_json::json!({
        "sub": user_id.to_string(),
        "aud": "authenticated",
        "role": "authenticated",
        "iat": now,
        "exp": now + 3600,
    });
    if let Some(email) = email {
        claims["email"] = Value::from(email);
    }
    if let Some(role) = role {
        claims["user_metadata"] = serde_json::json!({ "role": role });
    }

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(TEST_JWT_SECRET.as_ref());

    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}

pub fn jwt_for(user: &AuthIdentity) -> String {
    create_test_jwt(user.id, Some(&user.email), Some(user.role)).unwrap()
}

/// Build a request, optionally authenticated and with a JSON body
pub fn request(method: Method, uri: &str, jwt: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(jwt) = jwt {
        builder = builder.header("authorization", format!("Bearer {}", jwt));
    }

    match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Parse response body as JSON
pub async fn parse_body(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
