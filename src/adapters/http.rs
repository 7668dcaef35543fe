//! HTTP adapter for the remote prediction service.
//!
//! Implements the `PredictionApi` port with a blocking reqwest client.
//! All calls run on a background worker thread, never on the UI thread.
//! No timeout is configured: a request settles when the server or the
//! environment closes it, and the caller's loading state stays active
//! until then.

use serde::Deserialize;

use crate::domain::{PatientInput, Prediction};
use crate::ports::{HealthStatus, PredictionApi};

/// Compile-time default base URL of the prediction API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Env var overriding the base URL.
pub const API_URL_ENV: &str = "HEPASCAN_API_URL";

/// Fallback when a failed response carries no usable message.
const GENERIC_PREDICT_ERROR: &str = "Error en la predicción";

/// Fallback for transport failures, shown to the user.
const CONNECT_ERROR: &str =
    "Error al conectar con el servidor. Por favor, intente nuevamente.";

/// A failed request-response cycle. Always surfaced to the user as a
/// single dismissible message; never retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP status, with the server-provided message or a
    /// generic fallback.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Transport or decode failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// The single user-visible message for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Http(_) => CONNECT_ERROR.to_string(),
        }
    }
}

/// Successful `/predict` response envelope.
#[derive(Debug, Deserialize)]
struct PredictEnvelope {
    prediction: Prediction,
}

/// Failed `/predict` response body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Blocking HTTP client for the prediction service.
pub struct HttpPredictionApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpPredictionApi {
    /// Create a client against the given base URL.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create a client from `HEPASCAN_API_URL`, falling back to the
    /// compile-time default.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PredictionApi for HttpPredictionApi {
    type Error = ApiError;

    fn predict(&self, input: &PatientInput) -> Result<Prediction, ApiError> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(input)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // The server reports failures as { "message": ... }; older
            // error handlers use { "error": ... }.
            let message = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.message.or(body.error))
                .unwrap_or_else(|| GENERIC_PREDICT_ERROR.to_string());
            tracing::warn!(status = status.as_u16(), "Prediction request rejected");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: PredictEnvelope = response.json()?;
        Ok(envelope.prediction)
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()?;

        // An unhealthy service answers 503 with a JSON body; the body is
        // authoritative when it parses.
        let status = response.status();
        match response.json::<HealthStatus>() {
            Ok(health) => Ok(health),
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(ApiError::Server {
                status: status.as_u16(),
                message: GENERIC_PREDICT_ERROR.to_string(),
            }),
        }
    }
}
