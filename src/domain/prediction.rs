//! Prediction result types.
//!
//! Represents the response of the remote risk prediction service. These
//! types are consumed, not owned: the server computes them, this client
//! only classifies and displays them.

use serde::{Deserialize, Deserializer, Serialize};

/// Risk classification derived from the predicted percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskClass {
    /// 50% or below
    Low,
    /// Strictly above 50%
    High,
}

impl RiskClass {
    /// Classify a risk percentage (0-100). Exactly 50.0 is `Low`.
    #[must_use]
    pub fn from_percentage(risk_percentage: f64) -> Self {
        if risk_percentage > 50.0 {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Display label shown in the result view.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "RIESGO BAJO",
            Self::High => "RIESGO ALTO",
        }
    }

    /// Associated color for the result view (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (40, 167, 69),   // Green (#28A745)
            Self::High => (220, 53, 69),  // Red (#DC3545)
        }
    }
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Follow-up urgency reported by the server.
///
/// The wire value `"immediate"` is the only one with special meaning; any
/// other token decodes as `Preventive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionRequired {
    Immediate,
    Preventive,
}

impl<'de> Deserialize<'de> for ActionRequired {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(if token == "immediate" {
            Self::Immediate
        } else {
            Self::Preventive
        })
    }
}

impl ActionRequired {
    /// Display label shown in the result view.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "Inmediata",
            Self::Preventive => "Preventiva",
        }
    }
}

/// Parsed prediction returned by the server on a successful request.
///
/// The server envelope carries extra fields (`risk_level`, `success`,
/// `timestamp`, an echo of the input); everything not listed here is
/// ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Risk as a percentage (0-100)
    pub risk_percentage: f64,

    /// Raw model probability (0-1)
    pub risk_probability: f64,

    /// Clinical recommendation text from the server
    pub risk_message: String,

    /// Follow-up urgency
    pub action_required: ActionRequired,

    /// Server-side risk label, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
}

impl Prediction {
    /// Classify this prediction for display.
    #[must_use]
    pub fn risk_class(&self) -> RiskClass {
        RiskClass::from_percentage(self.risk_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_fifty_is_low() {
        assert_eq!(RiskClass::from_percentage(50.0), RiskClass::Low);
        assert_eq!(RiskClass::from_percentage(50.01), RiskClass::High);
        assert_eq!(RiskClass::from_percentage(0.0), RiskClass::Low);
        assert_eq!(RiskClass::from_percentage(100.0), RiskClass::High);
    }

    #[test]
    fn test_risk_labels() {
        assert_eq!(RiskClass::High.label(), "RIESGO ALTO");
        assert_eq!(RiskClass::Low.label(), "RIESGO BAJO");
    }

    #[test]
    fn test_action_required_decodes_immediate_or_other() {
        let a: ActionRequired = serde_json::from_str("\"immediate\"").expect("Should parse");
        assert_eq!(a, ActionRequired::Immediate);

        let a: ActionRequired = serde_json::from_str("\"preventive\"").expect("Should parse");
        assert_eq!(a, ActionRequired::Preventive);

        // Unknown tokens are "other", not an error.
        let a: ActionRequired = serde_json::from_str("\"routine\"").expect("Should parse");
        assert_eq!(a, ActionRequired::Preventive);
    }

    #[test]
    fn test_prediction_parses_server_shape() {
        let json = r#"{
            "risk_percentage": 72.3,
            "risk_probability": 0.723,
            "risk_level": "alto",
            "risk_message": "Alerta: Cita clínica inmediata.",
            "action_required": "immediate"
        }"#;
        let p: Prediction = serde_json::from_str(json).expect("Should parse");
        assert!((p.risk_percentage - 72.3).abs() < f64::EPSILON);
        assert_eq!(p.action_required, ActionRequired::Immediate);
        assert_eq!(p.risk_class(), RiskClass::High);
        assert_eq!(p.risk_level.as_deref(), Some("alto"));
    }
}
