//! Background workers for network calls.
//!
//! The submission POST and the startup health probe both block, so they
//! run on short-lived threads and report back over mpsc channels polled
//! from the draw loop. Each worker sends exactly one terminal message,
//! which is what clears the in-flight state regardless of outcome.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::adapters::ApiError;
use crate::application::SubmissionService;
use crate::domain::{PatientInput, Prediction};
use crate::ports::PredictionApi;

/// Outcome of a submission attempt.
#[derive(Debug, Clone)]
pub enum SubmitProgress {
    /// Prediction received
    Complete(Prediction),
    /// Attempt failed; single user-visible message
    Failed(String),
}

/// Handle to a running submission worker.
pub struct SubmitWorkerHandle {
    progress_rx: Receiver<SubmitProgress>,
    _handle: JoinHandle<()>,
}

impl SubmitWorkerHandle {
    /// Try to receive the outcome (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<SubmitProgress> {
        self.progress_rx.try_recv().ok()
    }
}

/// Worker that runs one submission cycle in the background.
pub struct SubmitWorker;

impl SubmitWorker {
    /// Spawn a background submission.
    ///
    /// Returns a handle to receive the single terminal outcome.
    pub fn spawn<A>(
        service: Arc<SubmissionService<A>>,
        input: PatientInput,
    ) -> SubmitWorkerHandle
    where
        A: PredictionApi + 'static,
        A::Error: Into<ApiError>,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_submission(&service, &input, &tx);
        });

        SubmitWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_submission<A>(
        service: &SubmissionService<A>,
        input: &PatientInput,
        tx: &Sender<SubmitProgress>,
    ) where
        A: PredictionApi,
        A::Error: Into<ApiError>,
    {
        match service.submit(input) {
            Ok(prediction) => {
                let _ = tx.send(SubmitProgress::Complete(prediction));
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                let _ = tx.send(SubmitProgress::Failed(e.user_message()));
            }
        }
    }
}

/// Outcome of the startup health probe.
#[derive(Debug, Clone)]
pub enum HealthReport {
    Healthy,
    /// Persistent warning text for the form banner
    Warning(String),
}

/// Handle to the one-shot health probe.
pub struct HealthProbeHandle {
    report_rx: Receiver<HealthReport>,
    _handle: JoinHandle<()>,
}

impl HealthProbeHandle {
    /// Try to receive the report (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<HealthReport> {
        self.report_rx.try_recv().ok()
    }
}

/// One-shot health probe run at startup. No retry loop, no polling.
pub struct HealthProbe;

impl HealthProbe {
    const UNAVAILABLE: &'static str =
        "El servidor de predicción no está disponible. Por favor, contacte al administrador.";
    const UNREACHABLE: &'static str =
        "No se puede conectar con el servidor. Asegúrese de que la API esté en ejecución.";

    /// Spawn the probe thread.
    pub fn spawn<A>(service: Arc<SubmissionService<A>>) -> HealthProbeHandle
    where
        A: PredictionApi + 'static,
        A::Error: Into<ApiError>,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let report = match service.check_health() {
                Ok(health) if health.is_healthy() => HealthReport::Healthy,
                Ok(health) => {
                    tracing::warn!(status = %health.status, "Prediction service unhealthy");
                    HealthReport::Warning(Self::UNAVAILABLE.to_string())
                }
                Err(e) => {
                    tracing::error!("Health check failed: {}", e);
                    HealthReport::Warning(Self::UNREACHABLE.to_string())
                }
            };
            let _ = tx.send(report);
        });

        HealthProbeHandle {
            report_rx: rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HealthStatus;
    use std::time::Duration;

    struct FailingApi;

    impl PredictionApi for FailingApi {
        type Error = ApiError;

        fn predict(&self, _input: &PatientInput) -> Result<Prediction, ApiError> {
            Err(ApiError::Server {
                status: 500,
                message: "Error interno del servidor".to_string(),
            })
        }

        fn health(&self) -> Result<HealthStatus, ApiError> {
            Err(ApiError::Server {
                status: 503,
                message: "down".to_string(),
            })
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

    fn wait_for<T>(recv: impl Fn() -> Option<T>) -> Option<T> {
        for _ in 0..100 {
            if let Some(msg) = recv() {
                return Some(msg);
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_failed_submission_sends_exactly_one_message() {
        let service = Arc::new(SubmissionService::new(Arc::new(FailingApi)));
        let worker = SubmitWorker::spawn(service, valid_input());

        let outcome = wait_for(|| worker.try_recv()).expect("Should report an outcome");
        match outcome {
            SubmitProgress::Failed(message) => {
                assert_eq!(message, "Error interno del servidor");
            }
            SubmitProgress::Complete(_) => panic!("Expected failure"),
        }

        // Terminal: nothing else ever arrives.
        thread::sleep(Duration::from_millis(50));
        assert!(worker.try_recv().is_none());
    }

    #[test]
    fn test_unreachable_service_reports_warning() {
        let service = Arc::new(SubmissionService::new(Arc::new(FailingApi)));
        let probe = HealthProbe::spawn(service);

        let report = wait_for(|| probe.try_recv()).expect("Should report");
        assert!(matches!(report, HealthReport::Warning(_)));
    }
}
