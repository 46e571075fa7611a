//! Mock submitter for isolating services in tests.

use mockall::mock;

use crate::domain::types::ClientId;
use crate::submission::{ClientSubmitter, SubmissionError, SubmissionPayload};

mock! {
    pub Submitter {}

    impl ClientSubmitter for Submitter {
        fn submit(&self, payload: &SubmissionPayload) -> Result<ClientId, SubmissionError>;
    }
}
