//! Domain entities for the Projects domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use edio_common::{Error, Result};

use crate::domain::state::PublishingState;

pub const MAX_TITLE_LEN: u64 = 200;
pub const MAX_DESCRIPTION_LEN: u64 = 5000;

/// Persisted publishing status.
///
/// Backed by the `publishing_status` PostgreSQL enum, so only these four
/// values can ever be stored or read back.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[sqlx(type_name = "publishing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PublishingStatus {
    #[default]
    Idle,
    Publishing,
    Completed,
    Failed,
}

impl PublishingStatus {
    #[mutants::skip] // Delegates to PublishingState::is_terminal()
    pub fn is_terminal(&self) -> bool {
        self.to_state().is_terminal()
    }

    /// Convert to state machine state
    pub fn to_state(&self) -> PublishingState {
        match self {
            PublishingStatus::Idle => PublishingState::Idle,
            PublishingStatus::Publishing => PublishingState::Publishing,
            PublishingStatus::Completed => PublishingState::Completed,
            PublishingStatus::Failed => PublishingState::Failed,
        }
    }

    /// Create from state machine state
    pub fn from_state(state: PublishingState) -> Self {
        match state {
            PublishingState::Idle => PublishingStatus::Idle,
            PublishingState::Publishing => PublishingStatus::Publishing,
            PublishingState::Completed => PublishingStatus::Completed,
            PublishingState::Failed => PublishingStatus::Failed,
        }
    }

    /// Get valid next statuses from the current one
    pub fn valid_transitions(&self) -> Vec<PublishingStatus> {
        self.to_state()
            .valid_transitions()
            .iter()
            .map(|s| PublishingStatus::from_state(*s))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishingStatus::Idle => "idle",
            PublishingStatus::Publishing => "publishing",
            PublishingStatus::Completed => "completed",
            PublishingStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PublishingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "idle" => Ok(PublishingStatus::Idle),
            "publishing" => Ok(PublishingStatus::Publishing),
            "completed" => Ok(PublishingStatus::Completed),
            "failed" => Ok(PublishingStatus::Failed),
            other => Err(Error::Validation(format!(
                "Unknown publishing status '{}'",
                other
            ))),
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub publishing_status: PublishingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project owned by `owner_id`, starting in `idle`
    pub fn new(owner_id: Uuid, title: String, description: Option<String>) -> Result<Self> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            owner_id,
            title: title.trim().to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            publishing_status: PublishingStatus::default(),
            created_at: now,
            updated_at: now,
        };

        project.validate()?;
        Ok(project)
    }

    /// Validate field invariants
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(Error::Validation("Project title is required".to_string()));
        }

        if self.title.chars().count() as u64 > MAX_TITLE_LEN {
            return Err(Error::Validation(format!(
                "Project title must be ≤{} characters",
                MAX_TITLE_LEN
            )));
        }

        if let Some(description) = &self.description {
            if description.chars().count() as u64 > MAX_DESCRIPTION_LEN {
                return Err(Error::Validation(format!(
                    "Project description must be ≤{} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }

        Ok(())
    }

    /// Record a status change that the store has already accepted
    pub(crate) fn record_status(&mut self, status: PublishingStatus) {
        self.publishing_status = status;
        self.updated_at = Utc::now();
    }
}
