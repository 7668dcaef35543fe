//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the prediction port to
//! implement the submission and health-check use cases.

mod submission;

pub use submission::{SubmissionService, SubmitError};
