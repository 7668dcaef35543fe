//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! All types are serializable and validated before submission.

mod patient;
mod prediction;
mod validation;

pub use patient::PatientInput;
pub use prediction::{ActionRequired, Prediction, RiskClass};
pub use validation::{
    CategoricalRule, NumericRule, ValidationError, CATEGORICAL_RULES, NUMERIC_RULES,
};
