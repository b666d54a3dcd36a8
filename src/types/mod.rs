//! Type-safe wrapper types for identifiers and secrets.

mod newtypes;

pub use newtypes::{ProjectId, ProjectToken};
