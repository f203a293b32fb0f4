//! Domain model for projects

pub mod entities;
pub mod state;
