//! Identity resolution port
//!
//! The session token only proves who the caller is; the Edio account
//! (role, profile) lives behind an [`IdentityProvider`]. PostgreSQL backs it
//! in production, the in-memory variant backs router tests.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AuthError;
use crate::types::{AuthIdentity, UserRole};

/// Account data used for just-in-time provisioning
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError>;

    /// Create the account if it does not exist yet and return the stored row.
    ///
    /// Accounts are keyed by id only; two ids may carry the same email.
    ///
    /// Concurrent first requests for the same id must all observe the same account.
    async fn provision_user(&self, user: NewUser) -> Result<AuthIdentity, AuthError>;
}

/// Users table in PostgreSQL.
#[derive(Clone)]
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        sqlx::query_as::<_, AuthIdentity>(
            r#"
            SELECT id, email, name, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })
    }

    async fn provision_user(&self, user: NewUser) -> Result<AuthIdentity, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "Failed to provision user");
            AuthError::UserProvisionFailed
        })?;

        self.find_user(user.id).await?.ok_or_else(|| {
            tracing::error!(user_id = %user.id, "User not found after provisioning");
            AuthError::UserProvisionFailed
        })
    }
}

/// Process-local accounts, for tests and local demos.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    users: RwLock<HashMap<Uuid, AuthIdentity>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account, replacing any existing one with the same id
    pub async fn insert(&self, identity: AuthIdentity) {
        self.users.write().await.insert(identity.id, identity);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn provision_user(&self, user: NewUser) -> Result<AuthIdentity, AuthError> {
        let mut users = self.users.write().await;
        let identity = users.entry(user.id).or_insert_with(|| {
            let now = Utc::now();
            AuthIdentity {
                id: user.id,
                email: user.email,
                name: user.name,
                role: user.role,
                created_at: now,
                updated_at: now,
            }
        });
        Ok(identity.clone())
    }
}
