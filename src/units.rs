//! Normalization of draft measurements into SI units.
//!
//! Conversion never panics: missing, non-finite, or non-positive inputs come
//! back as [`InvalidMeasurement`], and callers must check before handing
//! values to the metrics engine.

use thiserror::Error;

use crate::domain::draft::{Draft, HeightUnit, WeightUnit};

pub const METERS_PER_INCH: f64 = 0.0254;
pub const KG_PER_POUND: f64 = 0.453592;
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Sentinel error for measurements that cannot be normalized.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("measurement is missing or out of range")]
pub struct InvalidMeasurement;

/// Height in meters from whichever representation is authoritative.
pub fn height_meters(draft: &Draft) -> Result<f64, InvalidMeasurement> {
    let meters = match draft.height_unit {
        HeightUnit::Cm => {
            let cms = draft.height_cms.ok_or(InvalidMeasurement)?;
            cms / 100.0
        }
        HeightUnit::Inches => {
            let feet = draft.height_feet.ok_or(InvalidMeasurement)?;
            let inches = draft.height_inches.ok_or(InvalidMeasurement)?;
            if !feet.is_finite() || !inches.is_finite() {
                return Err(InvalidMeasurement);
            }
            if feet < 0.0 || !(0.0..=INCHES_PER_FOOT).contains(&inches) {
                return Err(InvalidMeasurement);
            }
            (feet * INCHES_PER_FOOT + inches) * METERS_PER_INCH
        }
    };
    if meters.is_finite() && meters > 0.0 {
        Ok(meters)
    } else {
        Err(InvalidMeasurement)
    }
}

/// Weight in kilograms from the draft's weight unit.
pub fn weight_kilograms(draft: &Draft) -> Result<f64, InvalidMeasurement> {
    let weight = draft.weight.ok_or(InvalidMeasurement)?;
    let kilograms = match draft.weight_unit {
        WeightUnit::Kg => weight,
        WeightUnit::Pounds => weight * KG_PER_POUND,
    };
    if kilograms.is_finite() && kilograms > 0.0 {
        Ok(kilograms)
    } else {
        Err(InvalidMeasurement)
    }
}

/// Splits centimeters into whole feet plus remaining inches.
///
/// Offered so a UI can suggest the equivalent when the user toggles units;
/// the stored representations themselves are never overwritten by a toggle.
pub fn cm_to_feet_inches(cms: f64) -> Result<(f64, f64), InvalidMeasurement> {
    if !cms.is_finite() || cms <= 0.0 {
        return Err(InvalidMeasurement);
    }
    let total_inches = cms / (METERS_PER_INCH * 100.0);
    let feet = (total_inches / INCHES_PER_FOOT).floor();
    let inches = total_inches - feet * INCHES_PER_FOOT;
    Ok((feet, inches))
}

/// Centimeters from a feet-plus-inches pair.
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> Result<f64, InvalidMeasurement> {
    if !feet.is_finite() || !inches.is_finite() || feet < 0.0 || inches < 0.0 {
        return Err(InvalidMeasurement);
    }
    let cms = (feet * INCHES_PER_FOOT + inches) * METERS_PER_INCH * 100.0;
    if cms > 0.0 {
        Ok(cms)
    } else {
        Err(InvalidMeasurement)
    }
}
