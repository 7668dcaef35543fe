//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest-based client for the remote prediction service

pub mod http;

// Re-export the request error for the application layer
pub use http::{ApiError, HttpPredictionApi};
