//! Core of the client onboarding biometric checkup wizard.
//!
//! A four-stage data-entry flow: measurement intake, derived-metrics review,
//! confirmation, and client creation. The crate owns the draft state machine,
//! the per-stage validation gates, unit normalization, and the pure metric
//! derivations; persistence sits behind the [`submission::ClientSubmitter`]
//! seam and rendering stays entirely with the caller.

pub mod config;
pub mod domain;
pub mod forms;
pub mod metrics;
pub mod router;
pub mod services;
pub mod store;
pub mod submission;
pub mod units;
pub mod validation;

pub use config::MetricsConfig;
pub use domain::draft::{ClientType, Draft, ExistingClient, FieldChange};
pub use domain::types::{ClientId, Stage, WizardId};
pub use store::{WizardEvent, WizardStore};
