//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a clinical-themed interface for:
//! - Patient data entry with inline validation
//! - Animated display of the returned risk score
//! - A startup warning when the prediction service is unhealthy

pub mod anim;
mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::ClinicTheme;
pub use worker::{HealthProbe, HealthProbeHandle, HealthReport, SubmitProgress, SubmitWorker, SubmitWorkerHandle};
