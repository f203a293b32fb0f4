//! Route definitions for Projects domain API

use axum::{routing::get, Router};

use super::handlers::{projects, publish};
use super::middleware::ProjectsState;

fn project_routes() -> Router<ProjectsState> {
    Router::new()
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/api/projects/{id}", get(projects::get_project))
}

fn publish_routes() -> Router<ProjectsState> {
    Router::new().route(
        "/api/projects/{id}/publish/status",
        get(publish::get_publishing_status).post(publish::update_publishing_status),
    )
}

/// Create all Projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new().merge(project_routes()).merge(publish_routes())
}
