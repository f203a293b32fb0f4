//! Edio application composition root
//!
//! Wires the identity provider and project store into the domain routers
//! and applies the shared HTTP middleware.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use edio_auth::{AuthBackend, AuthConfig, IdentityProvider, PgIdentityProvider};
use edio_common::Config;
use edio_projects::{PgProjectStore, ProjectStore, ProjectsState};
use serde_json::json;
use sqlx::PgPool;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};

/// Request bodies are small JSON documents
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Token settings derived from the service configuration
pub fn auth_config(config: &Config) -> AuthConfig {
    AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    }
}

/// Create the application router backed by PostgreSQL
pub async fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let identities: Arc<dyn IdentityProvider> = Arc::new(PgIdentityProvider::new(pool.clone()));
    let store: Arc<dyn ProjectStore> = Arc::new(PgProjectStore::new(pool));

    let auth = AuthBackend::new(identities, auth_config(config));
    let projects_state = ProjectsState::new(store, auth, config.store_timeout());

    tracing::info!(
        store_timeout_ms = config.store_timeout_ms,
        "Projects domain initialized"
    );

    Ok(build_router(projects_state))
}

/// Compose domain routers with the shared infrastructure routes
pub fn build_router(projects_state: ProjectsState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Edio API v0.0.1-SNAPSHOT" }))
        .merge(edio_projects::routes().with_state(projects_state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Turn a handler panic into the generic 500 body
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail: &str = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// CORS layer from a comma-separated origin list; `*` allows any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.trim() == "*" {
        return base.allow_origin(AnyOrigin);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(allowed)
}
