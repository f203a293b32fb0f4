//! Projects domain: project records and the publishing-status lifecycle

pub mod api;
pub mod domain;
pub mod repository;
pub mod tracker;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Project, PublishingStatus};
pub use domain::state::{PublishEvent, PublishingState, PublishingStateMachine};
pub use edio_common::StateError;

pub use repository::{
    InMemoryProjectStore, PgProjectStore, ProjectStore, StatusUpdate, StoreError,
};
pub use tracker::{PublishingStatusTracker, TrackerError, DEFAULT_STORE_TIMEOUT};

// Re-export API types
pub use api::routes::routes;
pub use api::ProjectsState;
