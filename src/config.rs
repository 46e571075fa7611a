//! Tunable coefficients behind the metrics engine.
//!
//! The ideal-weight anchor and the body-age heuristic are reconstructed from
//! the wizard's visible constants rather than standardized formulas, so every
//! coefficient is configurable with the source values as defaults.

use serde::{Deserialize, Serialize};

/// Coefficients for the derived-metric formulas.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Ideal-weight anchor: `ideal_kg = anchor * height_m^2`.
    pub ideal_weight_anchor: f64,

    /// Mifflin-St Jeor weight coefficient (kcal per kg).
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (kcal per cm).
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (kcal per year, subtracted).
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor constant for men.
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor constant for women.
    pub msj_female_constant: f64,

    /// Deurenberg BMI coefficient.
    pub deurenberg_bmi_coef: f64,
    /// Deurenberg age coefficient.
    pub deurenberg_age_coef: f64,
    /// Deurenberg sex-factor coefficient (factor 1 for men, 0 for women).
    pub deurenberg_sex_coef: f64,
    /// Deurenberg constant term.
    pub deurenberg_constant: f64,

    /// Skeletal-muscle baseline percentage for men.
    pub muscle_baseline_male: f64,
    /// Skeletal-muscle baseline percentage for women.
    pub muscle_baseline_female: f64,
    /// Baseline shift for a slim build.
    pub muscle_offset_slim: f64,
    /// Baseline shift for a medium build.
    pub muscle_offset_medium: f64,
    /// Baseline shift for a heavy build.
    pub muscle_offset_fat: f64,

    /// BMI value treated as neutral by the body-age heuristic.
    pub reference_bmi: f64,
    /// Body-fat percentage treated as ideal for men.
    pub ideal_fat_male: f64,
    /// Body-fat percentage treated as ideal for women.
    pub ideal_fat_female: f64,
    /// Years of body age added per BMI point away from the reference.
    pub body_age_bmi_weight: f64,
    /// Years of body age added per body-fat point away from the ideal.
    pub body_age_fat_weight: f64,
    /// Visceral-fat reading above which body age is penalized.
    pub visceral_fat_high_threshold: f64,
    /// Years added when the visceral-fat reading is high.
    pub visceral_fat_penalty_years: f64,
    /// Body age is clamped to `age - clamp_below ..= age + clamp_above`.
    pub body_age_clamp_below: f64,
    pub body_age_clamp_above: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            ideal_weight_anchor: 21.0,
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: 5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            deurenberg_bmi_coef: 1.20,
            deurenberg_age_coef: 0.23,
            deurenberg_sex_coef: 10.8,
            deurenberg_constant: 5.4,
            muscle_baseline_male: 37.0,
            muscle_baseline_female: 31.0,
            muscle_offset_slim: 4.0,
            muscle_offset_medium: 0.0,
            muscle_offset_fat: -5.0,
            reference_bmi: 22.0,
            ideal_fat_male: 15.0,
            ideal_fat_female: 25.0,
            body_age_bmi_weight: 0.5,
            body_age_fat_weight: 0.3,
            visceral_fat_high_threshold: 12.0,
            visceral_fat_penalty_years: 2.0,
            body_age_clamp_below: 10.0,
            body_age_clamp_above: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config: MetricsConfig =
            serde_json::from_str(r#"{"ideal_weight_anchor": 22.0}"#).expect("deserialize");
        assert_eq!(config.ideal_weight_anchor, 22.0);
        assert_eq!(config.msj_height_coef, 6.25);
        assert_eq!(config.msj_female_constant, -161.0);
    }
}
