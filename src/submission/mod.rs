//! The client-creation boundary the wizard hands a finalized draft to.
//!
//! The backend itself is out of scope; the wizard only knows the
//! [`ClientSubmitter`] seam, the payload shape it submits, and the errors it
//! must survive without losing the draft.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::draft::{BodyComposition, Draft, Gender, HeightUnit, WeightUnit};
use crate::domain::metrics::ComputedMetrics;
use crate::domain::types::ClientId;
use crate::validation::{Field, stage_one_completed};

#[cfg(feature = "test-mocks")]
pub mod mock;

/// Errors surfaced by the submission backend.
///
/// None of these are fatal to the wizard: the draft stays on the confirmation
/// stage for retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// Backend refused the payload.
    #[error("submission rejected: {0}")]
    Rejected(String),
    /// Backend could not be reached or answered with a transport failure.
    #[error("submission backend unavailable: {0}")]
    Unavailable(String),
    /// Backend answered, but without a usable client id.
    #[error("malformed submission response: {0}")]
    MalformedResponse(String),
}

/// Errors building a payload from a draft that is not ready to submit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("draft is missing {0}")]
    MissingField(Field),
}

/// A measurement in the unit the user chose to work in.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

/// Everything the backend needs to create a client.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<NaiveDate>,
    /// Height in the authoritative display unit: centimeters for `Cm`,
    /// total inches for `Inches`.
    pub height: Measurement<HeightUnit>,
    pub weight: Measurement<WeightUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visceral_fat: Option<f64>,
    pub body_composition: BodyComposition,
    pub derived_metrics: ComputedMetrics,
}

impl SubmissionPayload {
    /// Serializes the payload into the JSON body a transport would send.
    pub fn to_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl TryFrom<&Draft> for SubmissionPayload {
    type Error = PayloadError;

    fn try_from(draft: &Draft) -> Result<Self, Self::Error> {
        // Re-run the intake gate so a payload can only exist for a draft the
        // gate would let through.
        let check = stage_one_completed(draft);
        if let (false, Some(field)) = (check.success, check.field) {
            return Err(PayloadError::MissingField(field));
        }

        let height = match draft.height_unit {
            HeightUnit::Cm => Measurement {
                value: draft.height_cms.ok_or(PayloadError::MissingField(Field::HeightCms))?,
                unit: HeightUnit::Cm,
            },
            HeightUnit::Inches => {
                let feet = draft
                    .height_feet
                    .ok_or(PayloadError::MissingField(Field::HeightFeet))?;
                let inches = draft
                    .height_inches
                    .ok_or(PayloadError::MissingField(Field::HeightInches))?;
                Measurement {
                    value: feet * 12.0 + inches,
                    unit: HeightUnit::Inches,
                }
            }
        };

        Ok(Self {
            name: draft.name.trim().to_string(),
            dob: draft.dob.ok_or(PayloadError::MissingField(Field::Dob))?,
            gender: draft.gender.ok_or(PayloadError::MissingField(Field::Gender))?,
            joining_date: draft.joining_date,
            height,
            weight: Measurement {
                value: draft.weight.ok_or(PayloadError::MissingField(Field::Weight))?,
                unit: draft.weight_unit,
            },
            visceral_fat: draft.visceral_fat_value(),
            body_composition: draft
                .body_composition
                .ok_or(PayloadError::MissingField(Field::BodyComposition))?,
            derived_metrics: draft.computed_metrics.clone(),
        })
    }
}

/// Seam to the backend that persists a client and assigns its id.
pub trait ClientSubmitter {
    /// Submits the finalized payload, returning the created client's id.
    fn submit(&self, payload: &SubmissionPayload) -> Result<ClientId, SubmissionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{ClientType, FieldChange};

    fn ready_draft() -> Draft {
        let mut draft = Draft::new(ClientType::New);
        for change in [
            FieldChange::Name("Asha Rao".to_string()),
            FieldChange::Dob(NaiveDate::from_ymd_opt(1998, 3, 2).expect("valid date")),
            FieldChange::Gender(Gender::Female),
            FieldChange::HeightCms(162.0),
            FieldChange::Weight(58.0),
            FieldChange::VisceralFat(Some("7".to_string())),
            FieldChange::BodyComposition(BodyComposition::Medium),
        ] {
            draft.apply_change(change);
        }
        draft
    }

    #[test]
    fn payload_carries_the_display_unit() {
        let payload = SubmissionPayload::try_from(&ready_draft()).expect("ready draft");
        assert_eq!(payload.height.value, 162.0);
        assert_eq!(payload.height.unit, HeightUnit::Cm);
        assert_eq!(payload.weight.unit, WeightUnit::Kg);
        assert_eq!(payload.visceral_fat, Some(7.0));
    }

    #[test]
    fn inch_height_is_submitted_as_total_inches() {
        let mut draft = ready_draft();
        draft.height_unit = HeightUnit::Inches;
        draft.apply_change(FieldChange::HeightFeet(5.0));
        draft.apply_change(FieldChange::HeightInches(4.0));

        let payload = SubmissionPayload::try_from(&draft).expect("ready draft");
        assert_eq!(payload.height.value, 64.0);
        assert_eq!(payload.height.unit, HeightUnit::Inches);
    }

    #[test]
    fn incomplete_draft_cannot_become_a_payload() {
        let mut draft = ready_draft();
        draft.gender = None;
        assert_eq!(
            SubmissionPayload::try_from(&draft),
            Err(PayloadError::MissingField(Field::Gender))
        );
    }

    #[test]
    fn body_omits_absent_optionals() {
        let mut draft = ready_draft();
        draft.visceral_fat = None;
        let payload = SubmissionPayload::try_from(&draft).expect("ready draft");
        let body = payload.to_body().expect("serializable");
        assert!(body.get("visceralFat").is_none());
        assert!(body.get("joiningDate").is_none());
        assert_eq!(body["name"], "Asha Rao");
    }
}
