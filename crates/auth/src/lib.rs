//! Authentication for the Edio API
//!
//! Validates session JWTs, resolves the calling user through an
//! [`IdentityProvider`], and exposes axum extractors that work with any
//! domain state implementing `FromRef<S>` for [`AuthBackend`].

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod provider;
mod types;

pub use backend::AuthBackend;
pub use claims::{SessionClaims, UserMetadata};
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{AuthUser, YoutuberUser};
pub use provider::{IdentityProvider, InMemoryIdentityProvider, NewUser, PgIdentityProvider};
pub use types::{AuthIdentity, UserRole};
