use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A numeric metric as it arrives off the wire. Scale integrations and older
/// mobile clients send some readings as strings ("7.5", " 72 ").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
}

impl Metric {
    pub fn as_f64(&self, field: &'static str) -> Result<f64, ScoreError> {
        match self {
            Metric::Number(n) => Ok(*n),
            Metric::Text(s) => s.trim().parse::<f64>().map_err(|_| ScoreError::FieldParse {
                field,
                value: s.clone(),
            }),
        }
    }
}

impl From<f64> for Metric {
    fn from(n: f64) -> Self {
        Metric::Number(n)
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("field `{field}` is not numeric: `{value}`")]
    FieldParse { field: &'static str, value: String },
}

/// One biometric reading. Every field is independently optional; absent fields
/// are excluded from scoring, not defaulted. Muscle percent is derived from
/// `muscle_mass` and `weight` and needs both; sleep needs hours and quality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiometricSnapshot {
    pub bmi: Option<Metric>,
    pub body_fat: Option<Metric>,
    pub muscle_mass: Option<Metric>,
    pub weight: Option<Metric>,
    pub visceral_fat: Option<Metric>,
    pub sleep_hours: Option<Metric>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<Metric>,
    pub body_age: Option<Metric>,
    pub hydration: Option<String>,
}

/// Weighted contribution of each factor that was actually present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub bmi: Option<f64>,
    pub body_fat: Option<f64>,
    pub muscle: Option<f64>,
    pub visceral_fat: Option<f64>,
    pub sleep: Option<f64>,
    pub stress: Option<f64>,
    pub body_age: Option<f64>,
    pub hydration: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Moderate,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Error,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Good => "Good",
            HealthStatus::Moderate => "Moderate",
            HealthStatus::NeedsAttention => "Needs Attention",
            HealthStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthScoreResult {
    /// 0-100, renormalized over the factors present, rounded to 2 decimals.
    pub score: f64,
    pub status: HealthStatus,
    pub components: ScoreComponents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
