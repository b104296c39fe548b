//! Weighted multi-factor health score.
//!
//! Each factor maps its raw reading through a piecewise bucket to a 0-100
//! sub-score, scaled by a fixed weight. The final score is renormalized over
//! the weights of the factors actually present, so a snapshot carrying only a
//! perfect BMI still scores 100 rather than 20.

use super::model::{
    BiometricSnapshot, HealthScoreResult, HealthStatus, ScoreComponents, ScoreError,
};

const W_BMI: f64 = 0.20;
const W_BODY_FAT: f64 = 0.20;
const W_MUSCLE: f64 = 0.15;
const W_VISCERAL: f64 = 0.10;
const W_SLEEP: f64 = 0.15;
const W_STRESS: f64 = 0.10;
const W_BODY_AGE: f64 = 0.05;
const W_HYDRATION: f64 = 0.05;

/// Snapshot with every present field parsed. Resolution is all-or-nothing:
/// one malformed field fails the whole call before any scoring happens.
struct Resolved {
    bmi: Option<f64>,
    body_fat: Option<f64>,
    muscle_percent: Option<f64>,
    visceral_fat: Option<i64>,
    sleep: Option<(f64, String)>,
    stress: Option<f64>,
    body_age: Option<f64>,
    hydration: Option<String>,
}

fn resolve(snap: &BiometricSnapshot) -> Result<Resolved, ScoreError> {
    let bmi = snap.bmi.as_ref().map(|m| m.as_f64("bmi")).transpose()?;
    let body_fat = snap
        .body_fat
        .as_ref()
        .map(|m| m.as_f64("body_fat"))
        .transpose()?;

    // Joint dependency: muscle percent exists only when both inputs do.
    let muscle_percent = match (&snap.muscle_mass, &snap.weight) {
        (Some(mass), Some(weight)) => {
            let mass = mass.as_f64("muscle_mass")?;
            let weight = weight.as_f64("weight")?;
            if weight <= 0.0 {
                return Err(ScoreError::FieldParse {
                    field: "weight",
                    value: weight.to_string(),
                });
            }
            Some(mass / weight * 100.0)
        }
        _ => None,
    };

    let visceral_fat = snap
        .visceral_fat
        .as_ref()
        .map(|m| m.as_f64("visceral_fat"))
        .transpose()?
        .map(|v| v as i64);

    let sleep = match (&snap.sleep_hours, &snap.sleep_quality) {
        (Some(hours), Some(quality)) => {
            Some((hours.as_f64("sleep_hours")?, quality.clone()))
        }
        _ => None,
    };

    let stress = snap
        .stress_level
        .as_ref()
        .map(|m| m.as_f64("stress_level"))
        .transpose()?;
    let body_age = snap
        .body_age
        .as_ref()
        .map(|m| m.as_f64("body_age"))
        .transpose()?;
    let hydration = snap.hydration.clone();

    Ok(Resolved {
        bmi,
        body_fat,
        muscle_percent,
        visceral_fat,
        sleep,
        stress,
        body_age,
        hydration,
    })
}

fn bmi_bucket(bmi: f64) -> f64 {
    if bmi < 18.5 {
        60.0
    } else if bmi < 25.0 {
        100.0
    } else if bmi < 30.0 {
        70.0
    } else {
        40.0
    }
}

fn body_fat_bucket(percent: f64) -> f64 {
    if percent < 10.0 {
        80.0
    } else if percent < 15.0 {
        100.0
    } else if percent < 20.0 {
        90.0
    } else if percent < 25.0 {
        80.0
    } else if percent < 30.0 {
        60.0
    } else {
        40.0
    }
}

fn muscle_bucket(percent: f64) -> f64 {
    if percent > 40.0 {
        100.0
    } else if percent > 35.0 {
        85.0
    } else if percent > 30.0 {
        70.0
    } else if percent > 25.0 {
        60.0
    } else {
        40.0
    }
}

fn visceral_fat_bucket(index: i64) -> f64 {
    if index <= 5 {
        100.0
    } else if index <= 9 {
        70.0
    } else if index <= 12 {
        50.0
    } else {
        30.0
    }
}

fn sleep_duration_bucket(hours: f64) -> f64 {
    if hours >= 7.5 {
        100.0
    } else if hours >= 7.0 {
        90.0
    } else if hours >= 6.0 {
        70.0
    } else if hours >= 5.0 {
        50.0
    } else {
        30.0
    }
}

fn sleep_quality_bucket(quality: &str) -> f64 {
    let q = quality.trim();
    if q.eq_ignore_ascii_case("excellent") {
        100.0
    } else if q.eq_ignore_ascii_case("good") {
        80.0
    } else if q.eq_ignore_ascii_case("fair") {
        60.0
    } else {
        40.0
    }
}

fn stress_bucket(level: f64) -> f64 {
    if level <= 3.0 {
        100.0
    } else if level <= 5.0 {
        80.0
    } else if level <= 7.0 {
        60.0
    } else {
        40.0
    }
}

fn body_age_bucket(years: f64) -> f64 {
    if years <= 30.0 {
        100.0
    } else if years <= 40.0 {
        80.0
    } else if years <= 50.0 {
        60.0
    } else {
        40.0
    }
}

fn hydration_bucket(code: &str) -> f64 {
    match code.trim().to_ascii_uppercase().as_str() {
        "A" | "1" => 100.0,
        "B" | "2" => 80.0,
        "C" | "3" => 60.0,
        _ => 40.0,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn classify(score: f64) -> HealthStatus {
    if score >= 80.0 {
        HealthStatus::Good
    } else if score >= 60.0 {
        HealthStatus::Moderate
    } else {
        HealthStatus::NeedsAttention
    }
}

/// Pure, synchronous, no I/O. A malformed field fails atomically: the result
/// carries status `Error`, score 0 and no components, never a partial blend.
pub fn compute_score(snapshot: &BiometricSnapshot) -> HealthScoreResult {
    let resolved = match resolve(snapshot) {
        Ok(r) => r,
        Err(e) => {
            return HealthScoreResult {
                score: 0.0,
                status: HealthStatus::Error,
                components: ScoreComponents::default(),
                error: Some(e.to_string()),
            }
        }
    };

    let mut components = ScoreComponents::default();
    let mut total = 0.0;
    let mut weight_used = 0.0;

    if let Some(bmi) = resolved.bmi {
        let c = bmi_bucket(bmi) * W_BMI;
        components.bmi = Some(c);
        total += c;
        weight_used += W_BMI;
    }
    if let Some(body_fat) = resolved.body_fat {
        let c = body_fat_bucket(body_fat) * W_BODY_FAT;
        components.body_fat = Some(c);
        total += c;
        weight_used += W_BODY_FAT;
    }
    if let Some(percent) = resolved.muscle_percent {
        let c = muscle_bucket(percent) * W_MUSCLE;
        components.muscle = Some(c);
        total += c;
        weight_used += W_MUSCLE;
    }
    if let Some(index) = resolved.visceral_fat {
        let c = visceral_fat_bucket(index) * W_VISCERAL;
        components.visceral_fat = Some(c);
        total += c;
        weight_used += W_VISCERAL;
    }
    if let Some((hours, quality)) = &resolved.sleep {
        let combined =
            sleep_duration_bucket(*hours) * 0.5 + sleep_quality_bucket(quality) * 0.5;
        let c = combined * W_SLEEP;
        components.sleep = Some(c);
        total += c;
        weight_used += W_SLEEP;
    }
    if let Some(level) = resolved.stress {
        let c = stress_bucket(level) * W_STRESS;
        components.stress = Some(c);
        total += c;
        weight_used += W_STRESS;
    }
    if let Some(years) = resolved.body_age {
        let c = body_age_bucket(years) * W_BODY_AGE;
        components.body_age = Some(c);
        total += c;
        weight_used += W_BODY_AGE;
    }
    if let Some(code) = &resolved.hydration {
        let c = hydration_bucket(code) * W_HYDRATION;
        components.hydration = Some(c);
        total += c;
        weight_used += W_HYDRATION;
    }

    let score = if weight_used > 0.0 {
        round2(total / weight_used)
    } else {
        0.0
    };

    HealthScoreResult {
        score,
        status: classify(score),
        components,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::model::Metric;

    fn snap() -> BiometricSnapshot {
        BiometricSnapshot::default()
    }

    #[test]
    fn empty_snapshot_scores_zero_needs_attention() {
        let result = compute_score(&snap());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.status, HealthStatus::NeedsAttention);
        assert_eq!(result.components, ScoreComponents::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn single_factor_renormalizes_to_its_own_weight() {
        let result = compute_score(&BiometricSnapshot {
            bmi: Some(22.0.into()),
            ..snap()
        });
        assert_eq!(result.score, 100.0);
        assert_eq!(result.status, HealthStatus::Good);
        assert_eq!(result.components.bmi, Some(20.0));
        assert_eq!(result.components.sleep, None);
    }

    #[test]
    fn multi_factor_weighted_average() {
        // bmi 22 -> 100*0.20, body_fat 12 -> 100*0.20,
        // muscle 40/100 -> 40% -> 85*0.15, stress 2 -> 100*0.10
        let result = compute_score(&BiometricSnapshot {
            bmi: Some(22.0.into()),
            body_fat: Some(12.0.into()),
            muscle_mass: Some(40.0.into()),
            weight: Some(100.0.into()),
            stress_level: Some(2.0.into()),
            ..snap()
        });
        assert_eq!(result.score, 96.54); // 62.75 / 0.65
        assert_eq!(result.status, HealthStatus::Good);
        assert_eq!(result.components.muscle, Some(85.0 * 0.15));
    }

    #[test]
    fn all_factors_present_weights_sum_to_one() {
        let result = compute_score(&BiometricSnapshot {
            bmi: Some(22.0.into()),
            body_fat: Some(12.0.into()),
            muscle_mass: Some(41.0.into()),
            weight: Some(100.0.into()),
            visceral_fat: Some(4.0.into()),
            sleep_hours: Some(8.0.into()),
            sleep_quality: Some("Excellent".into()),
            stress_level: Some(1.0.into()),
            body_age: Some(25.0.into()),
            hydration: Some("A".into()),
        });
        // every bucket maxed -> exactly 100 with no renormalization slack
        assert_eq!(result.score, 100.0);
        assert_eq!(result.status, HealthStatus::Good);
    }

    #[test]
    fn bmi_bucket_boundaries() {
        assert_eq!(bmi_bucket(18.49), 60.0);
        assert_eq!(bmi_bucket(18.5), 100.0);
        assert_eq!(bmi_bucket(24.99), 100.0);
        assert_eq!(bmi_bucket(25.0), 70.0);
        assert_eq!(bmi_bucket(29.99), 70.0);
        assert_eq!(bmi_bucket(30.0), 40.0);
    }

    #[test]
    fn body_fat_bucket_boundaries() {
        assert_eq!(body_fat_bucket(9.9), 80.0);
        assert_eq!(body_fat_bucket(10.0), 100.0);
        assert_eq!(body_fat_bucket(15.0), 90.0);
        assert_eq!(body_fat_bucket(20.0), 80.0);
        assert_eq!(body_fat_bucket(25.0), 60.0);
        assert_eq!(body_fat_bucket(30.0), 40.0);
    }

    #[test]
    fn muscle_bucket_is_upper_inclusive() {
        assert_eq!(muscle_bucket(40.01), 100.0);
        assert_eq!(muscle_bucket(40.0), 85.0);
        assert_eq!(muscle_bucket(35.0), 70.0);
        assert_eq!(muscle_bucket(30.0), 60.0);
        assert_eq!(muscle_bucket(25.0), 40.0);
    }

    #[test]
    fn visceral_fat_bucket_boundaries() {
        assert_eq!(visceral_fat_bucket(5), 100.0);
        assert_eq!(visceral_fat_bucket(6), 70.0);
        assert_eq!(visceral_fat_bucket(9), 70.0);
        assert_eq!(visceral_fat_bucket(10), 50.0);
        assert_eq!(visceral_fat_bucket(12), 50.0);
        assert_eq!(visceral_fat_bucket(13), 30.0);
    }

    #[test]
    fn sleep_combines_duration_and_quality_evenly() {
        let result = compute_score(&BiometricSnapshot {
            sleep_hours: Some(7.5.into()),
            sleep_quality: Some("fair".into()),
            ..snap()
        });
        // (100*0.5 + 60*0.5) = 80 for the sole factor
        assert_eq!(result.score, 80.0);
        assert_eq!(result.status, HealthStatus::Good);
    }

    #[test]
    fn sleep_requires_both_hours_and_quality() {
        let result = compute_score(&BiometricSnapshot {
            sleep_hours: Some(8.0.into()),
            ..snap()
        });
        assert_eq!(result.score, 0.0);
        assert_eq!(result.components.sleep, None);
    }

    #[test]
    fn sleep_hours_accepts_numeric_string() {
        let result = compute_score(&BiometricSnapshot {
            sleep_hours: Some(Metric::Text("7.5".into())),
            sleep_quality: Some("Excellent".into()),
            ..snap()
        });
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn stress_and_body_age_buckets_are_lower_exclusive() {
        assert_eq!(stress_bucket(3.0), 100.0);
        assert_eq!(stress_bucket(3.1), 80.0);
        assert_eq!(stress_bucket(5.0), 80.0);
        assert_eq!(stress_bucket(7.0), 60.0);
        assert_eq!(stress_bucket(7.1), 40.0);
        assert_eq!(body_age_bucket(30.0), 100.0);
        assert_eq!(body_age_bucket(40.0), 80.0);
        assert_eq!(body_age_bucket(50.0), 60.0);
        assert_eq!(body_age_bucket(50.5), 40.0);
    }

    #[test]
    fn hydration_codes_are_case_insensitive() {
        assert_eq!(hydration_bucket("a"), 100.0);
        assert_eq!(hydration_bucket("1"), 100.0);
        assert_eq!(hydration_bucket(" b "), 80.0);
        assert_eq!(hydration_bucket("2"), 80.0);
        assert_eq!(hydration_bucket("C"), 60.0);
        assert_eq!(hydration_bucket("d"), 40.0);
        assert_eq!(hydration_bucket("unknown"), 40.0);
    }

    #[test]
    fn muscle_requires_both_mass_and_weight() {
        let result = compute_score(&BiometricSnapshot {
            muscle_mass: Some(40.0.into()),
            bmi: Some(22.0.into()),
            ..snap()
        });
        assert_eq!(result.components.muscle, None);
        assert_eq!(result.score, 100.0); // only BMI contributed
    }

    #[test]
    fn malformed_field_fails_atomically() {
        let result = compute_score(&BiometricSnapshot {
            bmi: Some(Metric::Text("not-a-number".into())),
            stress_level: Some(2.0.into()),
            ..snap()
        });
        assert_eq!(result.score, 0.0);
        assert_eq!(result.status, HealthStatus::Error);
        // the valid stress field must not leak into the breakdown
        assert_eq!(result.components, ScoreComponents::default());
        assert!(result.error.as_deref().unwrap().contains("bmi"));
    }

    #[test]
    fn zero_weight_is_rejected_not_divided_by() {
        let result = compute_score(&BiometricSnapshot {
            muscle_mass: Some(40.0.into()),
            weight: Some(0.0.into()),
            ..snap()
        });
        assert_eq!(result.status, HealthStatus::Error);
    }

    #[test]
    fn score_is_rounded_to_two_decimals() {
        // bmi 26 -> 70*0.2 = 14, sleep (7.2h, good) -> (90+80)/2*0.15 = 12.75
        // total 26.75 / 0.35 = 76.428571...
        let result = compute_score(&BiometricSnapshot {
            bmi: Some(26.0.into()),
            sleep_hours: Some(7.2.into()),
            sleep_quality: Some("Good".into()),
            ..snap()
        });
        assert_eq!(result.score, 76.43);
        assert_eq!(result.status, HealthStatus::Moderate);
    }

    #[test]
    fn moderate_and_needs_attention_thresholds() {
        assert_eq!(classify(80.0), HealthStatus::Good);
        assert_eq!(classify(79.99), HealthStatus::Moderate);
        assert_eq!(classify(60.0), HealthStatus::Moderate);
        assert_eq!(classify(59.99), HealthStatus::NeedsAttention);
    }
}
