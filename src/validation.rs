//! Pure per-stage completeness checks gating forward transitions.
//!
//! Checks scan the draft in a fixed field order and report the first failing
//! field so the UI can point at exactly one input. They never mutate and
//! never panic.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::draft::{Draft, HeightUnit};
use crate::domain::types::Stage;

/// Draft field a failed check points at.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Dob,
    Gender,
    HeightCms,
    HeightFeet,
    HeightInches,
    Weight,
    BodyComposition,
    ComputedMetrics,
    ClientId,
}

impl Field {
    /// Label suitable for inline error messaging.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Dob => "date of birth",
            Field::Gender => "gender",
            Field::HeightCms => "height (cm)",
            Field::HeightFeet => "height (feet)",
            Field::HeightInches => "height (inches)",
            Field::Weight => "weight",
            Field::BodyComposition => "body composition",
            Field::ComputedMetrics => "computed metrics",
            Field::ClientId => "client id",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a stage gate: success, or the first field blocking it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageCheck {
    pub success: bool,
    pub field: Option<Field>,
}

impl StageCheck {
    pub const fn ok() -> Self {
        Self {
            success: true,
            field: None,
        }
    }

    pub const fn blocked(field: Field) -> Self {
        Self {
            success: false,
            field: Some(field),
        }
    }
}

fn positive(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite() && v > 0.0)
}

/// Intake-stage completeness check.
///
/// Scan order is fixed: name, dob, gender, height per active unit, weight,
/// body composition. The first missing or invalid field wins.
pub fn stage_one_completed(draft: &Draft) -> StageCheck {
    if draft.name.trim().is_empty() {
        return StageCheck::blocked(Field::Name);
    }
    if draft.dob.is_none() {
        return StageCheck::blocked(Field::Dob);
    }
    if draft.gender.is_none() {
        return StageCheck::blocked(Field::Gender);
    }
    match draft.height_unit {
        HeightUnit::Cm => {
            if !positive(draft.height_cms) {
                return StageCheck::blocked(Field::HeightCms);
            }
        }
        HeightUnit::Inches => {
            // Feet may be zero when the whole height sits in the inches part,
            // but the pair must still add up to a positive height.
            match draft.height_feet {
                Some(feet) if feet.is_finite() && feet >= 0.0 => {}
                _ => return StageCheck::blocked(Field::HeightFeet),
            }
            match draft.height_inches {
                Some(inches) if inches.is_finite() && (0.0..=12.0).contains(&inches) => {}
                _ => return StageCheck::blocked(Field::HeightInches),
            }
            let total = draft.height_feet.unwrap_or(0.0) * 12.0
                + draft.height_inches.unwrap_or(0.0);
            if total <= 0.0 {
                return StageCheck::blocked(Field::HeightFeet);
            }
        }
    }
    if !positive(draft.weight) {
        return StageCheck::blocked(Field::Weight);
    }
    if draft.body_composition.is_none() {
        return StageCheck::blocked(Field::BodyComposition);
    }
    StageCheck::ok()
}

/// Review stage may only be left forward once metrics exist.
pub fn stage_two_completed(draft: &Draft) -> StageCheck {
    if draft.computed_metrics.is_empty() {
        return StageCheck::blocked(Field::ComputedMetrics);
    }
    StageCheck::ok()
}

/// Confirmation stage may only be left forward once the backend assigned an id.
pub fn stage_three_completed(draft: &Draft) -> StageCheck {
    if draft.client_id.is_none() {
        return StageCheck::blocked(Field::ClientId);
    }
    StageCheck::ok()
}

/// Gate for leaving `stage` in the forward direction.
pub fn gate_for(stage: Stage, draft: &Draft) -> StageCheck {
    match stage {
        Stage::INTAKE => stage_one_completed(draft),
        Stage::REVIEW => stage_two_completed(draft),
        Stage::CONFIRM => stage_three_completed(draft),
        // Terminal stage has no forward gate.
        _ => StageCheck::ok(),
    }
}
