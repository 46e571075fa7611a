//! Pure derivation of composite health metrics from normalized inputs.
//!
//! Each function validates its own inputs and returns `None` instead of
//! panicking; the aggregator simply omits what could not be derived so the
//! review screen renders only present metrics.
//!
//! BMR follows Mifflin-St Jeor (1990); body fat follows the Deurenberg
//! population regression. Ideal weight and body age are the wizard's own
//! heuristics, kept configurable in [`MetricsConfig`].

use crate::config::MetricsConfig;
use crate::domain::draft::{BodyComposition, Gender};
use crate::domain::metrics::{ComputedMetrics, MetricName};

/// Normalized inputs for one full metrics evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsInput {
    pub height_m: f64,
    pub weight_kg: f64,
    pub age_years: Option<i32>,
    pub gender: Option<Gender>,
    pub body_composition: Option<BodyComposition>,
    pub visceral_fat: Option<f64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn valid_height(height_m: f64) -> bool {
    height_m.is_finite() && height_m > 0.0 && height_m < 3.0
}

fn valid_weight(weight_kg: f64) -> bool {
    weight_kg.is_finite() && weight_kg > 0.0 && weight_kg < 500.0
}

fn valid_age(age_years: i32) -> bool {
    (1..=120).contains(&age_years)
}

/// Body Mass Index, rounded to one decimal.
pub fn bmi(height_m: f64, weight_kg: f64) -> Option<f64> {
    if !valid_height(height_m) || !valid_weight(weight_kg) {
        return None;
    }
    Some(round1(weight_kg / (height_m * height_m)))
}

/// Ideal weight in kilograms, anchored at a configurable BMI.
pub fn ideal_weight_kg(height_m: f64, config: &MetricsConfig) -> Option<f64> {
    if !valid_height(height_m) {
        return None;
    }
    Some(round1(config.ideal_weight_anchor * height_m * height_m))
}

/// Basal metabolic rate via Mifflin-St Jeor, rounded to whole kcal/day.
pub fn bmr(
    height_m: f64,
    weight_kg: f64,
    age_years: i32,
    gender: Gender,
    config: &MetricsConfig,
) -> Option<f64> {
    if !valid_height(height_m) || !valid_weight(weight_kg) || !valid_age(age_years) {
        return None;
    }
    let height_cm = height_m * 100.0;
    let constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };
    let kcal = config.msj_weight_coef * weight_kg + config.msj_height_coef * height_cm
        - config.msj_age_coef * f64::from(age_years)
        + constant;
    Some(kcal.round())
}

/// Deurenberg body-fat percentage from BMI, age, and sex, one decimal.
pub fn body_fat_percent(
    bmi_value: f64,
    age_years: i32,
    gender: Gender,
    config: &MetricsConfig,
) -> Option<f64> {
    if !bmi_value.is_finite() || bmi_value <= 0.0 || !valid_age(age_years) {
        return None;
    }
    let sex_factor = match gender {
        Gender::Male => 1.0,
        Gender::Female => 0.0,
    };
    let percent = config.deurenberg_bmi_coef * bmi_value
        + config.deurenberg_age_coef * f64::from(age_years)
        - config.deurenberg_sex_coef * sex_factor
        - config.deurenberg_constant;
    Some(round1(percent.clamp(0.0, 75.0)))
}

/// Approximate skeletal-muscle percentage: a gender baseline shifted by the
/// self-reported build. Not medical-grade.
pub fn skeletal_muscle_percent(
    gender: Gender,
    body_composition: BodyComposition,
    config: &MetricsConfig,
) -> Option<f64> {
    let baseline = match gender {
        Gender::Male => config.muscle_baseline_male,
        Gender::Female => config.muscle_baseline_female,
    };
    let offset = match body_composition {
        BodyComposition::Slim => config.muscle_offset_slim,
        BodyComposition::Medium => config.muscle_offset_medium,
        BodyComposition::Fat => config.muscle_offset_fat,
    };
    Some(round1(baseline + offset))
}

/// Heuristic body age: chronological age shifted by how far BMI and body fat
/// sit from their reference values, clamped to `[age-10, age+15]`.
pub fn body_age(
    age_years: i32,
    bmi_value: f64,
    body_fat: f64,
    gender: Gender,
    visceral_fat: Option<f64>,
    config: &MetricsConfig,
) -> Option<f64> {
    if !valid_age(age_years) || !bmi_value.is_finite() || !body_fat.is_finite() {
        return None;
    }
    let ideal_fat = match gender {
        Gender::Male => config.ideal_fat_male,
        Gender::Female => config.ideal_fat_female,
    };
    let age = f64::from(age_years);
    let mut shifted = age
        + config.body_age_bmi_weight * (bmi_value - config.reference_bmi)
        + config.body_age_fat_weight * (body_fat - ideal_fat);
    if matches!(visceral_fat, Some(v) if v > config.visceral_fat_high_threshold) {
        shifted += config.visceral_fat_penalty_years;
    }
    let clamped = shifted
        .round()
        .clamp(age - config.body_age_clamp_below, age + config.body_age_clamp_above);
    Some(clamped)
}

/// Derives every metric the inputs allow, omitting the rest.
///
/// Pure: identical inputs always produce an identical map.
pub fn compute_all(input: &MetricsInput, config: &MetricsConfig) -> ComputedMetrics {
    let mut metrics = ComputedMetrics::new();

    let bmi_value = bmi(input.height_m, input.weight_kg);
    if let Some(value) = bmi_value {
        metrics.insert(MetricName::Bmi, value);
    }
    if let Some(value) = ideal_weight_kg(input.height_m, config) {
        metrics.insert(MetricName::IdealWeight, value);
    }
    if let (Some(age), Some(gender)) = (input.age_years, input.gender) {
        if let Some(value) = bmr(input.height_m, input.weight_kg, age, gender, config) {
            metrics.insert(MetricName::Bmr, value);
        }
        let fat = bmi_value.and_then(|b| body_fat_percent(b, age, gender, config));
        if let Some(value) = fat {
            metrics.insert(MetricName::BodyFatPercent, value);
        }
        if let Some(comp) = input.body_composition {
            if let Some(value) = skeletal_muscle_percent(gender, comp, config) {
                metrics.insert(MetricName::SkeletalMusclePercent, value);
            }
        }
        if let (Some(b), Some(f)) = (bmi_value, fat) {
            if let Some(value) = body_age(age, b, f, gender, input.visceral_fat, config) {
                metrics.insert(MetricName::BodyAge, value);
            }
        }
    }

    metrics
}
