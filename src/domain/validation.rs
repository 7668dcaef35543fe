//! Pre-submission validation of patient input.
//!
//! Fail-fast: fields are checked in declaration order, numeric fields
//! strictly before categorical ones, and only the first failure is
//! reported. Invalid input is an expected outcome here, so the result is
//! a plain `Result`, not a panic or an aggregate error list.

use crate::domain::PatientInput;

/// Closed-range rule for one numeric field.
pub struct NumericRule {
    /// Display name used in validation messages
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    get: fn(&PatientInput) -> f64,
}

impl NumericRule {
    /// Read this rule's field from the input.
    #[must_use]
    pub fn value(&self, input: &PatientInput) -> f64 {
        (self.get)(input)
    }
}

/// Non-empty rule for one categorical field.
pub struct CategoricalRule {
    /// Display name used in validation messages
    pub label: &'static str,
    get: fn(&PatientInput) -> &str,
}

impl CategoricalRule {
    /// Read this rule's field from the input.
    #[must_use]
    pub fn value<'a>(&self, input: &'a PatientInput) -> &'a str {
        (self.get)(input)
    }
}

/// Numeric field rules, in the order they are checked.
pub const NUMERIC_RULES: [NumericRule; 4] = [
    NumericRule {
        label: "Age",
        min: 0.0,
        max: 120.0,
        get: |p| p.age,
    },
    NumericRule {
        label: "BMI",
        min: 10.0,
        max: 60.0,
        get: |p| p.bmi,
    },
    NumericRule {
        label: "Liver function score",
        min: 0.0,
        max: 100.0,
        get: |p| p.liver_function_score,
    },
    NumericRule {
        label: "Alpha-fetoprotein level",
        min: 0.0,
        max: 1000.0,
        get: |p| p.alpha_fetoprotein_level,
    },
];

/// Categorical field rules, checked after all numeric rules pass.
pub const CATEGORICAL_RULES: [CategoricalRule; 4] = [
    CategoricalRule {
        label: "Gender",
        get: |p| &p.gender,
    },
    CategoricalRule {
        label: "Alcohol consumption",
        get: |p| &p.alcohol_consumption,
    },
    CategoricalRule {
        label: "Smoking status",
        get: |p| &p.smoking_status,
    },
    CategoricalRule {
        label: "Physical activity level",
        get: |p| &p.physical_activity_level,
    },
];

/// A locally detected input problem. Blocks submission; never reaches the
/// network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    /// The human-readable message for the first failing field.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl PatientInput {
    /// Validate this input against the static field rules.
    ///
    /// Numeric fields are checked first, in declaration order: a NaN value
    /// (failed parse) reports "must be a valid number", an out-of-range
    /// value reports the closed range. Both endpoints are valid. Only then
    /// are the categorical fields checked for a non-empty selection; any
    /// non-empty token is accepted.
    ///
    /// # Errors
    /// Returns the first failure found, never more than one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for rule in &NUMERIC_RULES {
            let value = rule.value(self);

            if value.is_nan() {
                return Err(ValidationError(format!(
                    "{} must be a valid number",
                    rule.label
                )));
            }

            if value < rule.min || value > rule.max {
                return Err(ValidationError(format!(
                    "{} must be between {} and {}",
                    rule.label, rule.min, rule.max
                )));
            }
        }

        for rule in &CATEGORICAL_RULES {
            if rule.value(self).is_empty() {
                return Err(ValidationError(format!(
                    "please select an option for {}",
                    rule.label
                )));
            }
        }

        Ok(())
    }
}
