//! In-memory project store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProjectStore, StatusUpdate, StoreError};
use crate::domain::entities::{Project, PublishingStatus};

/// Project records held in process memory.
///
/// Status writes happen under the map's write lock, which makes the
/// compare-and-set atomic with respect to every other reader and writer.
#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<HashMap<Uuid, Project>>,
    unavailable: AtomicBool,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`] until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn find(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        self.check_available()?;
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, StoreError> {
        self.check_available()?;

        let mut owned: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(owned
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn create(&self, project: &Project) -> Result<Project, StoreError> {
        self.check_available()?;

        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(StoreError::Duplicate(format!(
                "project {} already exists",
                project.id
            )));
        }
        projects.insert(project.id, project.clone());
        Ok(project.clone())
    }

    async fn read_status(&self, id: Uuid) -> Result<Option<PublishingStatus>, StoreError> {
        self.check_available()?;
        Ok(self
            .projects
            .read()
            .await
            .get(&id)
            .map(|p| p.publishing_status))
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: PublishingStatus,
        new: PublishingStatus,
    ) -> Result<StatusUpdate, StoreError> {
        self.check_available()?;

        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(&id) else {
            return Ok(StatusUpdate::NotFound);
        };

        if project.publishing_status != expected {
            return Ok(StatusUpdate::Conflict(project.publishing_status));
        }

        project.record_status(new);
        Ok(StatusUpdate::Updated(project.clone()))
    }
}
