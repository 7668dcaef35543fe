//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the remote prediction service, so the
//! submission logic stays testable without a live server.

mod api;

pub use api::{HealthStatus, PredictionApi};
