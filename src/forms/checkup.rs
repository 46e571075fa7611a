//! Raw intake form as a UI submits it: everything is a string until parsed.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::draft::{BodyComposition, FieldChange, Gender, HeightUnit, WeightUnit};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors turning raw form strings into typed field changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormParseError {
    #[error("invalid date in {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("invalid number in {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("unknown {field} choice: {value}")]
    UnknownChoice { field: &'static str, value: String },
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for the measurement intake stage.
pub struct IntakeForm {
    /// Client display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[validate(length(min = 1))]
    pub dob: String,
    /// `male` or `female`.
    pub gender: String,
    /// Joining date, `YYYY-MM-DD`, optional.
    #[serde(default)]
    pub joining_date: Option<String>,
    /// `Cm` or `Inches`.
    pub height_unit: String,
    #[serde(default)]
    pub height_cms: Option<String>,
    #[serde(default)]
    pub height_feet: Option<String>,
    #[serde(default)]
    pub height_inches: Option<String>,
    /// `Kg` or `Pounds`.
    pub weight_unit: String,
    #[serde(default)]
    pub weight: Option<String>,
    /// Optional numeric indicator, kept as text in the draft.
    #[serde(default)]
    pub visceral_fat: Option<String>,
    /// `Slim`, `Medium`, or `Fat`.
    pub body_composition: String,
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| FormParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, FormParseError> {
    let parsed = value.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    parsed.ok_or_else(|| FormParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_gender(value: &str) -> Result<Gender, FormParseError> {
    match value.trim().to_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        _ => Err(FormParseError::UnknownChoice {
            field: "gender",
            value: value.to_string(),
        }),
    }
}

fn parse_height_unit(value: &str) -> Result<HeightUnit, FormParseError> {
    match value.trim().to_lowercase().as_str() {
        "cm" => Ok(HeightUnit::Cm),
        "inches" => Ok(HeightUnit::Inches),
        _ => Err(FormParseError::UnknownChoice {
            field: "height_unit",
            value: value.to_string(),
        }),
    }
}

fn parse_weight_unit(value: &str) -> Result<WeightUnit, FormParseError> {
    match value.trim().to_lowercase().as_str() {
        "kg" => Ok(WeightUnit::Kg),
        "pounds" => Ok(WeightUnit::Pounds),
        _ => Err(FormParseError::UnknownChoice {
            field: "weight_unit",
            value: value.to_string(),
        }),
    }
}

fn parse_body_composition(value: &str) -> Result<BodyComposition, FormParseError> {
    match value.trim().to_lowercase().as_str() {
        "slim" => Ok(BodyComposition::Slim),
        "medium" => Ok(BodyComposition::Medium),
        "fat" => Ok(BodyComposition::Fat),
        _ => Err(FormParseError::UnknownChoice {
            field: "body_composition",
            value: value.to_string(),
        }),
    }
}

impl IntakeForm {
    /// Parses the form into the typed changes to dispatch, including the
    /// height-unit authority switch.
    ///
    /// Only filled-in measurement fields produce changes; completeness is the
    /// validation gate's job, not the parser's.
    pub fn changes(&self) -> Result<(HeightUnit, Vec<FieldChange>), FormParseError> {
        let mut changes = vec![
            FieldChange::Name(self.name.trim().to_string()),
            FieldChange::Dob(parse_date("dob", &self.dob)?),
            FieldChange::Gender(parse_gender(&self.gender)?),
        ];
        if let Some(joining) = non_blank(&self.joining_date) {
            changes.push(FieldChange::JoiningDate(parse_date("joining_date", joining)?));
        }
        if let Some(cms) = non_blank(&self.height_cms) {
            changes.push(FieldChange::HeightCms(parse_number("height_cms", cms)?));
        }
        if let Some(feet) = non_blank(&self.height_feet) {
            changes.push(FieldChange::HeightFeet(parse_number("height_feet", feet)?));
        }
        if let Some(inches) = non_blank(&self.height_inches) {
            changes.push(FieldChange::HeightInches(parse_number(
                "height_inches",
                inches,
            )?));
        }
        changes.push(FieldChange::WeightUnit(parse_weight_unit(&self.weight_unit)?));
        if let Some(weight) = non_blank(&self.weight) {
            changes.push(FieldChange::Weight(parse_number("weight", weight)?));
        }
        changes.push(FieldChange::VisceralFat(
            non_blank(&self.visceral_fat).map(str::to_string),
        ));
        changes.push(FieldChange::BodyComposition(parse_body_composition(
            &self.body_composition,
        )?));

        Ok((parse_height_unit(&self.height_unit)?, changes))
    }
}
