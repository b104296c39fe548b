use serde::Deserialize;
use uuid::Uuid;

use crate::scoring::model::BiometricSnapshot;

/// Wire payload for create and update. Numbers arrive validated by the
/// caller; the lenient string-or-number path lives on /health-score.
#[derive(Debug, Deserialize)]
pub struct UpsertBodyParameters {
    pub dietitian_id: Option<Uuid>,
    pub height: Option<String>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub body_fat: Option<f64>,
    pub trunk_fat: Option<f64>,
    pub subcutaneous_fat: Option<f64>,
    pub muscle: Option<f64>,
    pub visceral_fat: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<f64>,
    pub body_age: Option<f64>,
    pub hydration: Option<String>,
}

impl UpsertBodyParameters {
    pub fn snapshot(&self) -> BiometricSnapshot {
        BiometricSnapshot {
            bmi: self.bmi.map(Into::into),
            body_fat: self.body_fat.map(Into::into),
            muscle_mass: self.muscle.map(Into::into),
            weight: self.weight.map(Into::into),
            visceral_fat: self.visceral_fat.map(|v| f64::from(v).into()),
            sleep_hours: self.sleep_hours.map(Into::into),
            sleep_quality: self.sleep_quality.clone(),
            stress_level: self.stress_level.map(Into::into),
            body_age: self.body_age.map(Into::into),
            hydration: self.hydration.clone(),
        }
    }
}
