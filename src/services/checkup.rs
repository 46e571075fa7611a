//! Orchestration of the checkup wizard: gate, normalize, derive, submit.

use chrono::NaiveDate;

use crate::domain::metrics::ComputedMetrics;
use crate::domain::types::{ClientId, Stage};
use crate::metrics::{MetricsInput, compute_all};
use crate::services::{ServiceError, ServiceResult};
use crate::store::{WizardEvent, WizardStore};
use crate::submission::{ClientSubmitter, SubmissionPayload};
use crate::units;
use crate::validation::stage_one_completed;

/// Leaves the intake stage: runs the gate, normalizes measurements, derives
/// the metrics map, and advances to review.
///
/// `today` anchors the age calculation; pass `Utc::now().date_naive()` in
/// production and a fixed date in tests.
pub fn enter_review(store: &mut WizardStore, today: NaiveDate) -> ServiceResult<()> {
    let check = stage_one_completed(store.draft());
    if let (false, Some(field)) = (check.success, check.field) {
        log::debug!("intake gate blocked on {field}");
        return Err(ServiceError::StageBlocked { field });
    }

    let draft = store.draft();
    let metrics = match (units::height_meters(draft), units::weight_kilograms(draft)) {
        (Ok(height_m), Ok(weight_kg)) => {
            let input = MetricsInput {
                height_m,
                weight_kg,
                age_years: draft.age_years(today),
                gender: draft.gender,
                body_composition: draft.body_composition,
                visceral_fat: draft.visceral_fat_value(),
            };
            compute_all(&input, store.config())
        }
        _ => {
            // A passing gate should leave nothing to normalize away; degrade
            // to an empty map rather than block the wizard.
            log::error!("measurements failed to normalize despite a passing intake gate");
            ComputedMetrics::new()
        }
    };

    store.apply(WizardEvent::UpdateMetrics(metrics))?;
    store.apply(WizardEvent::SetStage(Stage::REVIEW))
}

/// Advances from review to the confirmation stage.
pub fn enter_confirm(store: &mut WizardStore) -> ServiceResult<()> {
    store.apply(WizardEvent::SetStage(Stage::CONFIRM))
}

/// Steps one stage backward; always permitted while unfrozen.
pub fn go_back(store: &mut WizardStore) -> ServiceResult<()> {
    let target = Stage::new(store.draft().stage.get() - 1)?;
    store.apply(WizardEvent::SetStage(target))
}

/// Confirms at stage 3: builds the payload, calls the backend, and on success
/// attaches the returned id and advances to the created stage.
///
/// On backend failure the draft is left intact on the confirmation stage so
/// the user can retry.
pub fn confirm_and_submit<S>(store: &mut WizardStore, submitter: &S) -> ServiceResult<ClientId>
where
    S: ClientSubmitter + ?Sized,
{
    if store.draft().stage != Stage::CONFIRM {
        return Err(ServiceError::Validation(
            "submission happens at the confirmation stage".to_string(),
        ));
    }

    let payload = SubmissionPayload::try_from(store.draft())?;
    let client_id = submitter.submit(&payload).map_err(|err| {
        log::error!("client submission failed: {err}");
        ServiceError::from(err)
    })?;

    store.apply(WizardEvent::AttachClientId(client_id))?;
    store.apply(WizardEvent::SetStage(Stage::CREATED))?;
    Ok(client_id)
}
