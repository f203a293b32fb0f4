//! HTTP API for the Projects domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ProjectsState;
