//! The reducer-style store owning one wizard draft.
//!
//! One store per open dialog; dropping it discards the draft. Every mutation
//! goes through [`WizardStore::apply`], which processes events one at a time
//! and leaves the draft untouched when an event is rejected.

use crate::config::MetricsConfig;
use crate::domain::draft::{ClientType, Draft, ExistingClient, FieldChange, HeightUnit};
use crate::domain::metrics::ComputedMetrics;
use crate::domain::types::{ClientId, Stage, WizardId};
use crate::services::{ServiceError, ServiceResult};
use crate::validation::gate_for;

/// Events the reducer accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum WizardEvent {
    /// Move to a stage. Forward moves are gated on the stage being left;
    /// backward moves are unconditional.
    SetStage(Stage),
    /// Mutate a single draft field.
    ChangeField(FieldChange),
    /// Switch which height representation is authoritative. The inactive
    /// representation's stored values are retained.
    ChangeHeightUnit(HeightUnit),
    /// Persist a freshly computed metrics map. Idempotent.
    UpdateMetrics(ComputedMetrics),
    /// Attach the id returned by the submission backend. Accepted exactly
    /// once, at the confirmation stage.
    AttachClientId(ClientId),
    /// Discard the draft and start over at intake.
    Reset,
}

/// Store owning the draft of one open wizard dialog.
#[derive(Debug, Clone)]
pub struct WizardStore {
    id: WizardId,
    draft: Draft,
    config: MetricsConfig,
}

impl WizardStore {
    /// Creates a store for a new wizard, optionally prefilled from a
    /// possibly-partial existing-client record.
    pub fn init(client_type: ClientType, existing: Option<ExistingClient>) -> Self {
        Self::with_config(client_type, existing, MetricsConfig::default())
    }

    /// Like [`WizardStore::init`] but with tuned metric coefficients.
    pub fn with_config(
        client_type: ClientType,
        existing: Option<ExistingClient>,
        config: MetricsConfig,
    ) -> Self {
        let draft = match existing {
            Some(record) => Draft::prefill(client_type, record),
            None => Draft::new(client_type),
        };
        Self {
            id: WizardId::new(),
            draft,
            config,
        }
    }

    pub fn id(&self) -> WizardId {
        self.id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Processes one event to completion.
    ///
    /// After the created stage only [`WizardEvent::Reset`] is accepted.
    pub fn apply(&mut self, event: WizardEvent) -> ServiceResult<()> {
        if self.draft.stage.is_terminal() && !matches!(event, WizardEvent::Reset) {
            return Err(ServiceError::Frozen);
        }

        match event {
            WizardEvent::SetStage(target) => self.set_stage(target),
            WizardEvent::ChangeField(change) => {
                self.draft.apply_change(change);
                Ok(())
            }
            WizardEvent::ChangeHeightUnit(unit) => {
                // Only the authority flips; both stored representations stay.
                self.draft.height_unit = unit;
                Ok(())
            }
            WizardEvent::UpdateMetrics(metrics) => {
                self.draft.computed_metrics = metrics;
                Ok(())
            }
            WizardEvent::AttachClientId(client_id) => self.attach_client_id(client_id),
            WizardEvent::Reset => {
                self.draft = Draft::new(self.draft.client_type);
                Ok(())
            }
        }
    }

    fn set_stage(&mut self, target: Stage) -> ServiceResult<()> {
        let current = self.draft.stage;
        if target <= current {
            self.draft.stage = target;
            return Ok(());
        }
        if target.get() - current.get() > 1 {
            log::debug!("rejected stage jump {current} -> {target}");
            return Err(ServiceError::Validation(
                "forward moves advance one stage at a time".to_string(),
            ));
        }
        let check = gate_for(current, &self.draft);
        match (check.success, check.field) {
            (true, _) => {
                self.draft.stage = target;
                Ok(())
            }
            (false, Some(field)) => {
                log::debug!("stage {current} gate blocked on {field}");
                Err(ServiceError::StageBlocked { field })
            }
            (false, None) => Err(ServiceError::Validation(format!(
                "stage {current} is incomplete"
            ))),
        }
    }

    fn attach_client_id(&mut self, client_id: ClientId) -> ServiceResult<()> {
        if self.draft.client_id.is_some() {
            return Err(ServiceError::ClientIdAlreadyAssigned);
        }
        if self.draft.stage != Stage::CONFIRM {
            return Err(ServiceError::Validation(
                "client id can only be attached at the confirmation stage".to_string(),
            ));
        }
        self.draft.client_id = Some(client_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{BodyComposition, Gender};
    use crate::domain::metrics::MetricName;
    use crate::validation::Field;
    use chrono::NaiveDate;

    fn completed_intake_store() -> WizardStore {
        let mut store = WizardStore::init(ClientType::New, None);
        for change in [
            FieldChange::Name("Ravi Kumar".to_string()),
            FieldChange::Dob(NaiveDate::from_ymd_opt(1995, 1, 20).expect("valid date")),
            FieldChange::Gender(Gender::Male),
            FieldChange::HeightCms(175.0),
            FieldChange::Weight(70.0),
            FieldChange::BodyComposition(BodyComposition::Medium),
        ] {
            store
                .apply(WizardEvent::ChangeField(change))
                .expect("field change");
        }
        store
    }

    fn some_metrics() -> ComputedMetrics {
        let mut metrics = ComputedMetrics::new();
        metrics.insert(MetricName::Bmi, 22.9);
        metrics
    }

    #[test]
    fn forward_move_is_rejected_until_the_gate_passes() {
        let mut store = WizardStore::init(ClientType::New, None);
        let before = store.draft().clone();

        let result = store.apply(WizardEvent::SetStage(Stage::REVIEW));
        assert_eq!(
            result,
            Err(ServiceError::StageBlocked { field: Field::Name })
        );
        // Rejected event leaves the draft untouched.
        assert_eq!(store.draft(), &before);

        let mut ready = completed_intake_store();
        ready
            .apply(WizardEvent::SetStage(Stage::REVIEW))
            .expect("gate passes");
        assert_eq!(ready.draft().stage, Stage::REVIEW);
    }

    #[test]
    fn backward_move_is_unconditional() {
        let mut store = completed_intake_store();
        store
            .apply(WizardEvent::SetStage(Stage::REVIEW))
            .expect("forward");
        store
            .apply(WizardEvent::SetStage(Stage::INTAKE))
            .expect("backward always allowed");
        assert_eq!(store.draft().stage, Stage::INTAKE);
    }

    #[test]
    fn forward_jumps_cannot_skip_a_gate() {
        let mut store = completed_intake_store();
        let result = store.apply(WizardEvent::SetStage(Stage::CONFIRM));
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(store.draft().stage, Stage::INTAKE);
    }

    #[test]
    fn toggling_height_unit_keeps_both_representations() {
        let mut store = completed_intake_store();
        store
            .apply(WizardEvent::ChangeField(FieldChange::HeightFeet(5.0)))
            .expect("field change");
        store
            .apply(WizardEvent::ChangeField(FieldChange::HeightInches(9.0)))
            .expect("field change");

        store
            .apply(WizardEvent::ChangeHeightUnit(HeightUnit::Inches))
            .expect("toggle");
        store
            .apply(WizardEvent::ChangeHeightUnit(HeightUnit::Cm))
            .expect("toggle back");

        let draft = store.draft();
        assert_eq!(draft.height_cms, Some(175.0));
        assert_eq!(draft.height_feet, Some(5.0));
        assert_eq!(draft.height_inches, Some(9.0));
        assert_eq!(draft.height_unit, HeightUnit::Cm);
    }

    #[test]
    fn client_id_attaches_exactly_once_and_only_at_confirm() {
        let mut store = completed_intake_store();
        let id = ClientId::new(101).expect("valid id");

        // Too early: still at intake.
        assert!(matches!(
            store.apply(WizardEvent::AttachClientId(id)),
            Err(ServiceError::Validation(_))
        ));

        store
            .apply(WizardEvent::UpdateMetrics(some_metrics()))
            .expect("metrics");
        store
            .apply(WizardEvent::SetStage(Stage::REVIEW))
            .expect("to review");
        store
            .apply(WizardEvent::SetStage(Stage::CONFIRM))
            .expect("to confirm");

        store
            .apply(WizardEvent::AttachClientId(id))
            .expect("first attach");
        assert_eq!(
            store.apply(WizardEvent::AttachClientId(id)),
            Err(ServiceError::ClientIdAlreadyAssigned)
        );
    }

    #[test]
    fn created_stage_freezes_the_draft() {
        let mut store = completed_intake_store();
        store
            .apply(WizardEvent::UpdateMetrics(some_metrics()))
            .expect("metrics");
        store
            .apply(WizardEvent::SetStage(Stage::REVIEW))
            .expect("to review");
        store
            .apply(WizardEvent::SetStage(Stage::CONFIRM))
            .expect("to confirm");
        store
            .apply(WizardEvent::AttachClientId(
                ClientId::new(7).expect("valid id"),
            ))
            .expect("attach");
        store
            .apply(WizardEvent::SetStage(Stage::CREATED))
            .expect("to created");

        assert_eq!(
            store.apply(WizardEvent::ChangeField(FieldChange::Weight(80.0))),
            Err(ServiceError::Frozen)
        );
        assert_eq!(
            store.apply(WizardEvent::SetStage(Stage::INTAKE)),
            Err(ServiceError::Frozen)
        );

        store.apply(WizardEvent::Reset).expect("reset allowed");
        assert_eq!(store.draft().stage, Stage::INTAKE);
        assert!(store.draft().client_id.is_none());
    }

    #[test]
    fn update_metrics_is_idempotent() {
        let mut store = completed_intake_store();
        store
            .apply(WizardEvent::UpdateMetrics(some_metrics()))
            .expect("metrics");
        let first = store.draft().clone();
        store
            .apply(WizardEvent::UpdateMetrics(some_metrics()))
            .expect("metrics again");
        assert_eq!(store.draft(), &first);
    }

    #[test]
    fn each_store_owns_an_independent_draft() {
        let a = WizardStore::init(ClientType::New, None);
        let b = WizardStore::init(ClientType::New, None);
        assert_ne!(a.id(), b.id());
    }
}
