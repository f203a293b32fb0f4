//! Project storage port and its implementations
//!
//! Handlers and the publishing tracker only see [`ProjectStore`]. The
//! PostgreSQL store is used in deployment; the in-memory store backs tests
//! and local demos.

pub mod memory;
pub mod postgres;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{Project, PublishingStatus};

pub use memory::InMemoryProjectStore;
pub use postgres::PgProjectStore;

/// Failures of the underlying store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

impl From<StoreError> for edio_common::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => edio_common::Error::Database(e),
            StoreError::Unavailable(msg) => edio_common::Error::Unavailable(msg),
            StoreError::Duplicate(msg) => edio_common::Error::Conflict(msg),
        }
    }
}

/// Outcome of a conditional status write
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// The stored status matched and was replaced
    Updated(Project),
    /// The stored status differed from the expected one; nothing was written
    Conflict(PublishingStatus),
    NotFound,
}

#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Projects owned by `owner_id`, newest first
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, StoreError>;

    async fn create(&self, project: &Project) -> Result<Project, StoreError>;

    async fn read_status(&self, id: Uuid) -> Result<Option<PublishingStatus>, StoreError>;

    /// Replace the status with `new` only if it still equals `expected`.
    ///
    /// The check and the write are a single atomic step, so two callers
    /// racing from the same `expected` value cannot both see `Updated`.
    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: PublishingStatus,
        new: PublishingStatus,
    ) -> Result<StatusUpdate, StoreError>;
}

/// Bound a store call; expiry is reported as [`StoreError::Unavailable`].
pub async fn with_timeout<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation = operation,
                timeout_ms = limit.as_millis() as u64,
                "Project store call timed out"
            );
            Err(StoreError::Unavailable(format!(
                "{} timed out after {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}
