//! Concrete authentication backend
//!
//! Pairs the token settings with an [`IdentityProvider`] and turns a bearer
//! token into an [`AuthContext`].

use std::sync::Arc;

use uuid::Uuid;

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::provider::{IdentityProvider, NewUser};
use crate::types::AuthIdentity;

/// Authentication backend shared by every domain router.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    provider: Arc<dyn IdentityProvider>,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(provider: Arc<dyn IdentityProvider>, config: AuthConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Provision a user from token claims on their first authenticated request.
    async fn provision_from_claims(
        &self,
        user_id: Uuid,
        claims: &SessionClaims,
    ) -> Result<AuthIdentity, AuthError> {
        let email = claims.email.clone().ok_or(AuthError::MissingEmail)?;
        let metadata = claims.user_metadata.clone().unwrap_or_default();

        let identity = self
            .provider
            .provision_user(NewUser {
                id: user_id,
                email,
                name: metadata.name,
                role: metadata.role.unwrap_or_default(),
            })
            .await?;

        tracing::info!(user_id = %user_id, role = %identity.role, "JIT user provisioned");
        Ok(identity)
    }

    /// Resolve the caller behind a session token.
    pub async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = match self.provider.find_user(user_id).await? {
            Some(user) => user,
            None => self.provision_from_claims(user_id, &claims).await?,
        };

        Ok(AuthContext::new(user))
    }
}
