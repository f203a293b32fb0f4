//! Identity types used for authentication and role checks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account role, chosen at sign-up
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type, Serialize, Deserialize,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Youtuber,
    #[default]
    Editor,
}

impl UserRole {
    /// Only YouTubers create projects and drive publishing
    pub fn can_publish(&self) -> bool {
        matches!(self, UserRole::Youtuber)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Youtuber => write!(f, "youtuber"),
            UserRole::Editor => write!(f, "editor"),
        }
    }
}
