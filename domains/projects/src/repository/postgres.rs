//! PostgreSQL project store

use sqlx::PgPool;
use uuid::Uuid;

use super::{ProjectStore, StatusUpdate, StoreError};
use crate::domain::entities::{Project, PublishingStatus};

#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error, id: Uuid) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(format!("project {} already exists", id))
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait::async_trait]
impl ProjectStore for PgProjectStore {
    async fn find(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, title, description, publishing_status,
                   created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, title, description, publishing_status,
                   created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn create(&self, project: &Project) -> Result<Project, StoreError> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                id, owner_id, title, description, publishing_status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, owner_id, title, description, publishing_status,
                      created_at, updated_at
            "#,
        )
        .bind(project.id)
        .bind(project.owner_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.publishing_status)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, project.id))
    }

    async fn read_status(&self, id: Uuid) -> Result<Option<PublishingStatus>, StoreError> {
        let status = sqlx::query_scalar::<_, PublishingStatus>(
            "SELECT publishing_status FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: PublishingStatus,
        new: PublishingStatus,
    ) -> Result<StatusUpdate, StoreError> {
        // The WHERE clause is the compare; Postgres row locking makes it atomic
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET publishing_status = $3, updated_at = NOW()
            WHERE id = $1 AND publishing_status = $2
            RETURNING id, owner_id, title, description, publishing_status,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(expected)
        .bind(new)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(project) = updated {
            return Ok(StatusUpdate::Updated(project));
        }

        // Zero rows: either the project is gone or another writer got there first
        match self.read_status(id).await? {
            Some(actual) => Ok(StatusUpdate::Conflict(actual)),
            None => Ok(StatusUpdate::NotFound),
        }
    }
}
