//! Prediction API port: Trait for the remote risk prediction service.

use serde::Deserialize;

use crate::domain::{PatientInput, Prediction};

/// Health report from the service's `/health` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Reported status token; `"healthy"` is the only success value.
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Trait for the remote prediction service.
///
/// One call per user action; no retries happen behind this boundary.
pub trait PredictionApi: Send + Sync {
    /// Error type for service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submit patient data and return the parsed prediction.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success response.
    fn predict(&self, input: &PatientInput) -> Result<Prediction, Self::Error>;

    /// One-shot service health probe.
    ///
    /// A reachable but unhealthy service returns `Ok` with a non-healthy
    /// status; only transport or decode problems are errors.
    ///
    /// # Errors
    /// Returns error if the service cannot be reached or the reply cannot
    /// be decoded.
    fn health(&self) -> Result<HealthStatus, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_healthy_counts_as_healthy() {
        let h: HealthStatus = serde_json::from_str(r#"{"status":"healthy"}"#).expect("Should parse");
        assert!(h.is_healthy());

        let h: HealthStatus =
            serde_json::from_str(r#"{"status":"unhealthy"}"#).expect("Should parse");
        assert!(!h.is_healthy());
    }

    #[test]
    fn test_extra_health_fields_ignored() {
        let json = r#"{
            "status": "healthy",
            "timestamp": "2026-08-30T10:00:00",
            "model_loaded": true
        }"#;
        let h: HealthStatus = serde_json::from_str(json).expect("Should parse");
        assert!(h.is_healthy());
    }
}
