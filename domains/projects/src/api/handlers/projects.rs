//! Project record API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use edio_auth::{AuthUser, YoutuberUser};
use edio_common::{Error, Pagination, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{Project, PublishingStatus, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::repository::with_timeout;

/// Request for creating a project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub title: String,

    #[validate(length(max = MAX_DESCRIPTION_LEN))]
    pub description: Option<String>,
}

/// Project response DTO
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub publishing_status: PublishingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            title: p.title,
            description: p.description,
            publishing_status: p.publishing_status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Create a project owned by the calling YouTuber
pub async fn create_project(
    YoutuberUser(ctx): YoutuberUser,
    State(state): State<ProjectsState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let project = Project::new(ctx.user.id, req.title, req.description)?;

    let created = with_timeout(
        state.tracker.store_timeout(),
        "create",
        state.store.create(&project),
    )
    .await?;

    tracing::info!(project_id = %created.id, owner_id = %ctx.user.id, "Project created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List projects owned by the caller
pub async fn list_projects(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ProjectResponse>>> {
    let projects = with_timeout(
        state.tracker.store_timeout(),
        "list_by_owner",
        state
            .store
            .list_by_owner(ctx.user.id, page.limit(), page.offset()),
    )
    .await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Get a single project by ID
pub async fn get_project(
    AuthUser(_ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>> {
    let project = with_timeout(state.tracker.store_timeout(), "find", state.store.find(id))
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    Ok(Json(project.into()))
}
