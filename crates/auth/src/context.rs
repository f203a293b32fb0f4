//! Authorization context for authenticated users

use uuid::Uuid;

use crate::types::{AuthIdentity, UserRole};

/// The resolved caller of a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    pub fn is_youtuber(&self) -> bool {
        self.user.role == UserRole::Youtuber
    }

    /// Whether the caller owns a record with the given owner id
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user.id == owner_id
    }
}
