//! Total mapping from a stage number to the active step's handler identity.
//!
//! Owns no rendering; callers pick their own component per [`StageView`].

use serde::{Deserialize, Serialize};

use crate::domain::types::Stage;

/// Handler identity for the wizard step a stage number selects.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StageView {
    Intake,
    Review,
    Confirm,
    Created,
    /// Anything outside the wizard's stage range.
    NoOp,
}

impl StageView {
    pub const fn as_str(self) -> &'static str {
        match self {
            StageView::Intake => "intake",
            StageView::Review => "review",
            StageView::Confirm => "confirm",
            StageView::Created => "created",
            StageView::NoOp => "no-op",
        }
    }
}

/// Selects the view for a raw stage number; out-of-range resolves to `NoOp`.
pub fn select_view(stage_number: i32) -> StageView {
    match Stage::new(stage_number) {
        Ok(Stage::INTAKE) => StageView::Intake,
        Ok(Stage::REVIEW) => StageView::Review,
        Ok(Stage::CONFIRM) => StageView::Confirm,
        Ok(Stage::CREATED) => StageView::Created,
        _ => StageView::NoOp,
    }
}
