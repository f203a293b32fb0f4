//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::UserRole;

/// Claims carried by a session token from the hosted auth service
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: Option<String>,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    pub aud: String,
    /// Session role (`authenticated`), not the Edio account role
    pub role: String,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

/// Profile data captured at sign-up
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub name: Option<String>,
}
