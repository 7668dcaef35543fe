//! # Hepascan
//!
//! Terminal client for a liver-cancer risk prediction API.
//!
//! This crate provides:
//! - A patient data entry form with local validation
//! - Submission of patient data to a remote `/predict` endpoint
//! - An animated result view for the returned risk score
//! - A one-shot `/health` probe at startup
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (patient input, validation, prediction)
//! - `ports`: Trait definition for the remote prediction service
//! - `adapters`: Concrete HTTP implementation (reqwest)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{PatientInput, Prediction, RiskClass};
