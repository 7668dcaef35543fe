//! Submission service: one request-response cycle per user submission.
//!
//! Validation always runs before any network call; invalid input never
//! leaves the process. Both failure kinds are terminal for the attempt:
//! no retry, no partial success.

use std::sync::Arc;

use crate::adapters::ApiError;
use crate::domain::{PatientInput, Prediction, ValidationError};
use crate::ports::{HealthStatus, PredictionApi};

/// Why a submission attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Locally detected; blocked before the network call.
    #[error("invalid patient data: {0}")]
    Validation(#[from] ValidationError),

    /// Network failure or server-reported failure.
    #[error("prediction request failed: {0}")]
    Request(#[from] ApiError),
}

impl SubmitError {
    /// The single user-visible message for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.message().to_string(),
            Self::Request(e) => e.user_message(),
        }
    }
}

/// Service for submitting patient data to the prediction API.
pub struct SubmissionService<A>
where
    A: PredictionApi,
{
    api: Arc<A>,
}

impl<A> SubmissionService<A>
where
    A: PredictionApi,
    A::Error: Into<ApiError>,
{
    /// Create a new submission service.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Run one submission cycle: validate, then predict.
    ///
    /// # Errors
    /// Returns `SubmitError::Validation` before any network call for bad
    /// input, or `SubmitError::Request` for a failed call.
    pub fn submit(&self, input: &PatientInput) -> Result<Prediction, SubmitError> {
        input.validate()?;

        tracing::info!("Submitting prediction request");
        let prediction = self
            .api
            .predict(input)
            .map_err(|e| SubmitError::Request(e.into()))?;

        tracing::info!(
            risk_percentage = prediction.risk_percentage,
            risk = %prediction.risk_class(),
            "Prediction received"
        );
        Ok(prediction)
    }

    /// One-shot health probe against the service.
    ///
    /// # Errors
    /// Returns error if the service cannot be reached.
    pub fn check_health(&self) -> Result<HealthStatus, ApiError> {
        self.api.health().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionRequired, RiskClass};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test double for the prediction port.
    struct MockApi {
        predict_calls: AtomicUsize,
        response: Result<Prediction, String>,
        health: Result<&'static str, String>,
    }

    impl MockApi {
        fn responding(prediction: Prediction) -> Self {
            Self {
                predict_calls: AtomicUsize::new(0),
                response: Ok(prediction),
                health: Ok("healthy"),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                predict_calls: AtomicUsize::new(0),
                response: Err(message.to_string()),
                health: Err(message.to_string()),
            }
        }
    }

    impl PredictionApi for MockApi {
        type Error = ApiError;

        fn predict(&self, _input: &PatientInput) -> Result<Prediction, ApiError> {
            self.predict_calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(p) => Ok(p.clone()),
                Err(message) => Err(ApiError::Server {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }

        fn health(&self) -> Result<HealthStatus, ApiError> {
            match &self.health {
                Ok(status) => Ok(HealthStatus {
                    status: (*status).to_string(),
                }),
                Err(message) => Err(ApiError::Server {
                    status: 503,
                    message: message.clone(),
                }),
            }
        }
    }

    fn valid_input() -> PatientInput {
        PatientInput {
            age: 45.0,
            bmi: 25.0,
            liver_function_score: 60.0,
            alpha_fetoprotein_level: 10.0,
            gender: "male".to_string(),
            alcohol_consumption: "none".to_string(),
            smoking_status: "never".to_string(),
            physical_activity_level: "moderate".to_string(),
            hepatitis_b: 0,
            hepatitis_c: 0,
            cirrhosis_history: 0,
            family_history_cancer: 0,
            diabetes: 0,
        }
    }

    fn high_risk_prediction() -> Prediction {
        Prediction {
            risk_percentage: 72.3,
            risk_probability: 0.723,
            risk_message: "See specialist".to_string(),
            action_required: ActionRequired::Immediate,
            risk_level: None,
        }
    }

    #[test]
    fn test_valid_input_reaches_the_api() {
        let api = Arc::new(MockApi::responding(high_risk_prediction()));
        let service = SubmissionService::new(api.clone());

        let prediction = service.submit(&valid_input()).expect("Should succeed");
        assert_eq!(api.predict_calls.load(Ordering::SeqCst), 1);
        assert_eq!(prediction.risk_class(), RiskClass::High);
    }

    #[test]
    fn test_invalid_input_never_reaches_the_api() {
        let api = Arc::new(MockApi::responding(high_risk_prediction()));
        let service = SubmissionService::new(api.clone());

        let mut input = valid_input();
        input.age = 300.0;
        let err = service.submit(&input).expect_err("Should fail");

        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(err.user_message(), "Age must be between 0 and 120");
        assert_eq!(api.predict_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_server_failure_surfaces_single_message() {
        let api = Arc::new(MockApi::failing("Error interno del servidor"));
        let service = SubmissionService::new(api);

        let err = service.submit(&valid_input()).expect_err("Should fail");
        assert!(matches!(err, SubmitError::Request(_)));
        assert_eq!(err.user_message(), "Error interno del servidor");
    }

    #[test]
    fn test_end_to_end_high_risk_classification() {
        // A successful submission with a 72.3% response classifies
        // RIESGO ALTO with the immediate-action label.
        let api = Arc::new(MockApi::responding(high_risk_prediction()));
        let service = SubmissionService::new(api);

        let prediction = service.submit(&valid_input()).expect("Should succeed");
        assert_eq!(prediction.risk_class().label(), "RIESGO ALTO");
        assert!((prediction.risk_percentage - 72.3).abs() < f64::EPSILON);
        assert_eq!(prediction.action_required.label(), "Inmediata");
    }

    #[test]
    fn test_health_probe_passthrough() {
        let api = Arc::new(MockApi::responding(high_risk_prediction()));
        let service = SubmissionService::new(api);
        assert!(service.check_health().expect("Should reach").is_healthy());

        let api = Arc::new(MockApi::failing("down"));
        let service = SubmissionService::new(api);
        assert!(service.check_health().is_err());
    }
}
