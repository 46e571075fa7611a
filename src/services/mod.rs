//! Service-layer errors and orchestration over the wizard store.

pub mod checkup;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::checkup::FormParseError;
use crate::submission::{PayloadError, SubmissionError};
use crate::validation::Field;

/// Errors a wizard operation can surface to its caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// A forward stage transition was blocked by an incomplete field.
    #[error("stage transition blocked by incomplete field: {field}")]
    StageBlocked { field: Field },

    /// The draft reached the created stage and accepts no further edits.
    #[error("draft is frozen after client creation")]
    Frozen,

    /// A client id was already attached to this draft.
    #[error("client id is already assigned")]
    ClientIdAlreadyAssigned,

    /// A constrained value failed construction.
    #[error("type constraint: {0}")]
    TypeConstraint(String),

    /// A request was malformed or out of order.
    #[error("validation error: {0}")]
    Validation(String),

    /// The submission backend failed; the draft is kept for retry.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<PayloadError> for ServiceError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::MissingField(field) => ServiceError::StageBlocked { field },
        }
    }
}

impl From<FormParseError> for ServiceError {
    fn from(err: FormParseError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
