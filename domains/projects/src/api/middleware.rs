//! Projects domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use edio_auth::AuthBackend;

use crate::repository::ProjectStore;
use crate::tracker::PublishingStatusTracker;

/// Application state for the Projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub store: Arc<dyn ProjectStore>,
    pub tracker: PublishingStatusTracker,
    pub auth: AuthBackend,
}

impl ProjectsState {
    /// Build the state with a tracker sharing `store`
    pub fn new(
        store: Arc<dyn ProjectStore>,
        auth: AuthBackend,
        store_timeout: std::time::Duration,
    ) -> Self {
        let tracker = PublishingStatusTracker::new(store.clone()).with_timeout(store_timeout);
        Self {
            store,
            tracker,
            auth,
        }
    }
}

impl FromRef<ProjectsState> for AuthBackend {
    fn from_ref(state: &ProjectsState) -> Self {
        state.auth.clone()
    }
}
