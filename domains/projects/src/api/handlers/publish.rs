//! Publishing-status API handlers
//!
//! These endpoints answer with a flat `{"error": "<message>"}` body, the
//! shape the status-polling front end already understands.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use edio_auth::YoutuberUser;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::PublishingStatus;
use crate::domain::state::PublishEvent;
use crate::repository::with_timeout;
use crate::tracker::TrackerError;

const READ_FAILURE: &str = "Failed to fetch publishing status";
const WRITE_FAILURE: &str = "Failed to update publishing status";

/// Requested change: either a target status or a workflow event
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TransitionRequest {
    Status { status: PublishingStatus },
    Event { event: PublishEvent },
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: PublishingStatus,
}

/// Errors surfaced by the publish endpoints
#[derive(Debug)]
pub enum PublishApiError {
    InvalidProjectId,
    InvalidBody(String),
    NotFound,
    InvalidTransition(String),
    /// Store failure, with the message for the operation that failed
    Store(&'static str),
}

impl PublishApiError {
    fn from_tracker(err: TrackerError, failure_message: &'static str) -> Self {
        match err {
            TrackerError::NotFound(_) => PublishApiError::NotFound,
            TrackerError::InvalidTransition { .. }
            | TrackerError::InvalidEvent { .. }
            | TrackerError::ConcurrentUpdate { .. } => {
                PublishApiError::InvalidTransition(err.to_string())
            }
            TrackerError::StoreUnavailable(_) => PublishApiError::Store(failure_message),
        }
    }
}

impl IntoResponse for PublishApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PublishApiError::InvalidProjectId => {
                (StatusCode::BAD_REQUEST, "Invalid project id".to_string())
            }
            PublishApiError::InvalidBody(detail) => (StatusCode::BAD_REQUEST, detail),
            PublishApiError::NotFound => (StatusCode::NOT_FOUND, "Project not found".to_string()),
            PublishApiError::InvalidTransition(detail) => (StatusCode::CONFLICT, detail),
            PublishApiError::Store(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn parse_project_id(raw: &str) -> Result<Uuid, PublishApiError> {
    Uuid::parse_str(raw).map_err(|_| PublishApiError::InvalidProjectId)
}

/// `GET /api/projects/{id}/publish/status`
pub async fn get_publishing_status(
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, PublishApiError> {
    let project_id = parse_project_id(&id)?;

    let status = state
        .tracker
        .get_status(project_id)
        .await
        .map_err(|e| {
            tracing::warn!(project_id = %project_id, error = %e, "Publishing status lookup failed");
            PublishApiError::from_tracker(e, READ_FAILURE)
        })?;

    Ok(Json(StatusResponse { status }))
}

/// `POST /api/projects/{id}/publish/status`
///
/// Only the owning YouTuber may move the status; anyone else gets 404.
pub async fn update_publishing_status(
    YoutuberUser(ctx): YoutuberUser,
    State(state): State<ProjectsState>,
    Path(id): Path<String>,
    body: Result<Json<TransitionRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, PublishApiError> {
    let project_id = parse_project_id(&id)?;
    let Json(request) = body.map_err(|e| PublishApiError::InvalidBody(e.body_text()))?;

    let project = with_timeout(
        state.tracker.store_timeout(),
        "find",
        state.store.find(project_id),
    )
    .await
    .map_err(|e| {
        tracing::error!(project_id = %project_id, error = %e, "Failed to load project");
        PublishApiError::Store(WRITE_FAILURE)
    })?
    .ok_or(PublishApiError::NotFound)?;

    if !ctx.owns(project.owner_id) {
        return Err(PublishApiError::NotFound);
    }

    let result = match request {
        TransitionRequest::Status { status } => state.tracker.transition(project_id, status).await,
        TransitionRequest::Event { event } => state.tracker.apply(project_id, event).await,
    };

    let status = result.map_err(|e| {
        tracing::warn!(
            project_id = %project_id,
            user_id = %ctx.user.id,
            error = %e,
            "Publishing status update rejected"
        );
        PublishApiError::from_tracker(e, WRITE_FAILURE)
    })?;

    Ok(Json(StatusResponse { status }))
}
