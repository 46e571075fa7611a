//! The wizard's working record and the typed mutations it accepts.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::metrics::ComputedMetrics;
use crate::domain::types::{ClientId, Stage};

/// Whether the wizard was opened for a brand-new client or an existing one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    #[default]
    New,
    Existing,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Self-reported build category used to shade the muscle estimate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BodyComposition {
    Slim,
    Medium,
    Fat,
}

/// Which height representation is authoritative for display and validation.
///
/// Both representations stay stored in the draft regardless of this choice.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WeightUnit {
    #[default]
    Kg,
    Pounds,
}

/// Possibly-partial record used to prefill the wizard for an existing client.
///
/// Every field is optional; missing fields default safely during prefill.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExistingClient {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub joining_date: Option<NaiveDate>,
    pub height_unit: Option<HeightUnit>,
    pub height_cms: Option<f64>,
    pub height_feet: Option<f64>,
    pub height_inches: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    pub weight: Option<f64>,
    pub visceral_fat: Option<String>,
    pub body_composition: Option<BodyComposition>,
}

/// Single-field mutation accepted by the store's reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldChange {
    Name(String),
    Dob(NaiveDate),
    Gender(Gender),
    JoiningDate(NaiveDate),
    HeightCms(f64),
    HeightFeet(f64),
    HeightInches(f64),
    WeightUnit(WeightUnit),
    Weight(f64),
    VisceralFat(Option<String>),
    BodyComposition(BodyComposition),
}

/// The wizard's working record.
///
/// Owned by one [`WizardStore`](crate::store::WizardStore) per open dialog and
/// mutated only through reducer events; dropped wholesale when the dialog
/// closes.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Draft {
    pub client_type: ClientType,
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub joining_date: Option<NaiveDate>,
    pub height_unit: HeightUnit,
    pub height_cms: Option<f64>,
    pub height_feet: Option<f64>,
    pub height_inches: Option<f64>,
    pub weight_unit: WeightUnit,
    pub weight: Option<f64>,
    /// Free-text numeric indicator; parsed lazily by the metrics path.
    pub visceral_fat: Option<String>,
    pub body_composition: Option<BodyComposition>,
    pub stage: Stage,
    /// Derived metrics present only once computed; absent entries are
    /// omitted, never null-filled.
    pub computed_metrics: ComputedMetrics,
    /// Assigned exactly once, from the submission backend's response.
    pub client_id: Option<ClientId>,
}

impl Draft {
    /// Creates an empty draft at the intake stage.
    pub fn new(client_type: ClientType) -> Self {
        Self {
            client_type,
            name: String::new(),
            dob: None,
            gender: None,
            joining_date: None,
            height_unit: HeightUnit::default(),
            height_cms: None,
            height_feet: None,
            height_inches: None,
            weight_unit: WeightUnit::default(),
            weight: None,
            visceral_fat: None,
            body_composition: None,
            stage: Stage::INTAKE,
            computed_metrics: ComputedMetrics::default(),
            client_id: None,
        }
    }

    /// Seeds a draft from a possibly-partial existing-client record.
    ///
    /// Missing fields keep their safe defaults; string fields are trimmed and
    /// blank values treated as absent.
    pub fn prefill(client_type: ClientType, existing: ExistingClient) -> Self {
        let mut draft = Self::new(client_type);
        draft.name = existing
            .name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_default();
        draft.dob = existing.dob;
        draft.gender = existing.gender;
        draft.joining_date = existing.joining_date;
        draft.height_unit = existing.height_unit.unwrap_or_default();
        draft.height_cms = existing.height_cms.filter(|v| v.is_finite());
        draft.height_feet = existing.height_feet.filter(|v| v.is_finite());
        draft.height_inches = existing.height_inches.filter(|v| v.is_finite());
        draft.weight_unit = existing.weight_unit.unwrap_or_default();
        draft.weight = existing.weight.filter(|v| v.is_finite());
        draft.visceral_fat = existing
            .visceral_fat
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        draft.body_composition = existing.body_composition;
        draft
    }

    /// Applies a single-field mutation in place.
    pub fn apply_change(&mut self, change: FieldChange) {
        match change {
            FieldChange::Name(name) => self.name = name,
            FieldChange::Dob(dob) => self.dob = Some(dob),
            FieldChange::Gender(gender) => self.gender = Some(gender),
            FieldChange::JoiningDate(date) => self.joining_date = Some(date),
            FieldChange::HeightCms(cms) => self.height_cms = Some(cms),
            FieldChange::HeightFeet(feet) => self.height_feet = Some(feet),
            FieldChange::HeightInches(inches) => self.height_inches = Some(inches),
            FieldChange::WeightUnit(unit) => self.weight_unit = unit,
            FieldChange::Weight(weight) => self.weight = Some(weight),
            FieldChange::VisceralFat(value) => {
                self.visceral_fat = value
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
            }
            FieldChange::BodyComposition(comp) => self.body_composition = Some(comp),
        }
    }

    /// Age in whole years at `today`, when a date of birth is present.
    pub fn age_years(&self, today: NaiveDate) -> Option<i32> {
        let dob = self.dob?;
        if dob > today {
            return None;
        }
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Visceral fat parsed from its free-text field, if numeric.
    pub fn visceral_fat_value(&self) -> Option<f64> {
        self.visceral_fat
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn prefill_defaults_missing_fields() {
        let draft = Draft::prefill(
            ClientType::Existing,
            ExistingClient {
                name: Some("  Priya  ".to_string()),
                weight: Some(61.5),
                ..ExistingClient::default()
            },
        );

        assert_eq!(draft.name, "Priya");
        assert_eq!(draft.weight, Some(61.5));
        assert_eq!(draft.height_unit, HeightUnit::Cm);
        assert_eq!(draft.weight_unit, WeightUnit::Kg);
        assert_eq!(draft.stage, Stage::INTAKE);
        assert!(draft.dob.is_none());
        assert!(draft.client_id.is_none());
        assert!(draft.computed_metrics.is_empty());
    }

    #[test]
    fn prefill_drops_blank_and_non_finite_values() {
        let draft = Draft::prefill(
            ClientType::Existing,
            ExistingClient {
                name: Some("   ".to_string()),
                height_cms: Some(f64::NAN),
                visceral_fat: Some(" ".to_string()),
                ..ExistingClient::default()
            },
        );

        assert!(draft.name.is_empty());
        assert!(draft.height_cms.is_none());
        assert!(draft.visceral_fat.is_none());
    }

    #[test]
    fn age_is_counted_in_whole_years() {
        let mut draft = Draft::new(ClientType::New);
        draft.apply_change(FieldChange::Dob(date(2000, 6, 15)));

        assert_eq!(draft.age_years(date(2025, 6, 14)), Some(24));
        assert_eq!(draft.age_years(date(2025, 6, 15)), Some(25));
        assert_eq!(draft.age_years(date(1999, 1, 1)), None);
    }

    #[test]
    fn visceral_fat_parses_only_numeric_text() {
        let mut draft = Draft::new(ClientType::New);
        draft.apply_change(FieldChange::VisceralFat(Some(" 9.5 ".to_string())));
        assert_eq!(draft.visceral_fat_value(), Some(9.5));

        draft.apply_change(FieldChange::VisceralFat(Some("high".to_string())));
        assert_eq!(draft.visceral_fat_value(), None);

        draft.apply_change(FieldChange::VisceralFat(None));
        assert!(draft.visceral_fat.is_none());
    }
}
