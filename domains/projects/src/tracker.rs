//! Publishing-status tracker
//!
//! Reads a project's publishing status and mediates transitions. Every
//! write is a compare-and-set against the status the transition was
//! validated from, so a stale request can never overwrite a newer state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::PublishingStatus;
use crate::domain::state::{PublishEvent, PublishingStateMachine};
use crate::repository::{with_timeout, ProjectStore, StatusUpdate, StoreError};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Project {0} not found")]
    NotFound(Uuid),

    #[error("Invalid transition: cannot transition from {from} to {to}")]
    InvalidTransition {
        from: PublishingStatus,
        to: PublishingStatus,
    },

    #[error("Invalid event: {event} is not accepted while {from}")]
    InvalidEvent {
        from: PublishingStatus,
        event: PublishEvent,
    },

    /// Another writer moved the status after it was read; the request may be retried
    #[error("Publishing status changed concurrently: expected {expected}, found {actual}")]
    ConcurrentUpdate {
        expected: PublishingStatus,
        actual: PublishingStatus,
    },

    #[error("Project store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for TrackerError {
    fn from(err: StoreError) -> Self {
        TrackerError::StoreUnavailable(err.to_string())
    }
}

#[derive(Clone)]
pub struct PublishingStatusTracker {
    store: Arc<dyn ProjectStore>,
    store_timeout: Duration,
}

impl PublishingStatusTracker {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    async fn bounded<T, F>(&self, operation: &str, fut: F) -> Result<T, TrackerError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        with_timeout(self.store_timeout, operation, fut)
            .await
            .map_err(|e| {
                tracing::error!(operation = operation, error = %e, "Project store call failed");
                TrackerError::from(e)
            })
    }

    /// Current publishing status of a project.
    pub async fn get_status(&self, project_id: Uuid) -> Result<PublishingStatus, TrackerError> {
        self.bounded("read_status", self.store.read_status(project_id))
            .await?
            .ok_or(TrackerError::NotFound(project_id))
    }

    /// Move a project to `requested` if the state machine allows it from the current status.
    pub async fn transition(
        &self,
        project_id: Uuid,
        requested: PublishingStatus,
    ) -> Result<PublishingStatus, TrackerError> {
        let current = self.get_status(project_id).await?;

        let event = PublishingStateMachine::validate(current.to_state(), requested.to_state())
            .map_err(|_| TrackerError::InvalidTransition {
                from: current,
                to: requested,
            })?;

        self.commit(project_id, current, requested, event).await
    }

    /// Apply a workflow event to a project, resolving the target status from the current one.
    pub async fn apply(
        &self,
        project_id: Uuid,
        event: PublishEvent,
    ) -> Result<PublishingStatus, TrackerError> {
        let current = self.get_status(project_id).await?;

        let next = PublishingStateMachine::transition(current.to_state(), event)
            .map(PublishingStatus::from_state)
            .map_err(|_| TrackerError::InvalidEvent {
                from: current,
                event,
            })?;

        self.commit(project_id, current, next, event).await
    }

    async fn commit(
        &self,
        project_id: Uuid,
        expected: PublishingStatus,
        next: PublishingStatus,
        event: PublishEvent,
    ) -> Result<PublishingStatus, TrackerError> {
        let outcome = self
            .bounded(
                "compare_and_set_status",
                self.store.compare_and_set_status(project_id, expected, next),
            )
            .await?;

        match outcome {
            StatusUpdate::Updated(project) => {
                tracing::info!(
                    project_id = %project_id,
                    from = %expected,
                    to = %project.publishing_status,
                    event = %event,
                    "Publishing status changed"
                );
                Ok(project.publishing_status)
            }
            StatusUpdate::Conflict(actual) => {
                tracing::warn!(
                    project_id = %project_id,
                    expected = %expected,
                    actual = %actual,
                    requested = %next,
                    "Publishing status changed concurrently"
                );
                match PublishingStateMachine::validate(actual.to_state(), next.to_state()) {
                    Ok(_) => Err(TrackerError::ConcurrentUpdate { expected, actual }),
                    Err(_) => Err(TrackerError::InvalidTransition {
                        from: actual,
                        to: next,
                    }),
                }
            }
            StatusUpdate::NotFound => Err(TrackerError::NotFound(project_id)),
        }
    }
}
