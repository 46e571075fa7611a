//! Domain aggregates exposed by the checkup service layer.

pub mod draft;
pub mod metrics;
pub mod types;
