//! Patient input types for liver-cancer risk prediction.
//!
//! The field set matches the prediction API's expected request body:
//! four numeric features, four categorical features and five binary flags.

use serde::{Deserialize, Serialize};

/// One prediction request worth of patient data.
///
/// Constructed fresh from the current form state on every submission
/// attempt; never mutated afterwards and never persisted. Serializes flat
/// to the JSON request body (numeric fields as numbers, categorical as
/// strings, binary flags as 0/1 integers).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in years (0-120)
    pub age: f64,

    /// Body mass index (10-60)
    pub bmi: f64,

    /// Liver function score (0-100)
    pub liver_function_score: f64,

    /// Alpha-fetoprotein level in ng/mL (0-1000)
    pub alpha_fetoprotein_level: f64,

    /// Selected gender token
    pub gender: String,

    /// Selected alcohol consumption token
    pub alcohol_consumption: String,

    /// Selected smoking status token
    pub smoking_status: String,

    /// Selected physical activity token
    pub physical_activity_level: String,

    /// Hepatitis B: 0 = no, 1 = yes
    pub hepatitis_b: u8,

    /// Hepatitis C: 0 = no, 1 = yes
    pub hepatitis_c: u8,

    /// History of cirrhosis: 0 = no, 1 = yes
    pub cirrhosis_history: u8,

    /// Family history of cancer: 0 = no, 1 = yes
    pub family_history_cancer: u8,

    /// Diabetes: 0 = no, 1 = yes
    pub diabetes: u8,
}
