//! Job DTOs
//!
//! Data transfer objects for job submission.

use serde::{Deserialize, Serialize};

/// Request to submit a new job to the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJob {
    /// Name of the job type to submit under
    pub job_type: String,

    /// Opaque input payload for the provider
    pub input: String,

    /// Optional hint about the expected output size in bytes
    pub expected_output_size: Option<u64>,

    /// Identity of the submitter (an opaque public key)
    pub submitter: String,
}

impl SubmitJob {
    /// Convenience constructor for the common case without a size hint
    pub fn new(
        job_type: impl Into<String>,
        input: impl Into<String>,
        submitter: impl Into<String>,
    ) -> Self {
        SubmitJob {
            job_type: job_type.into(),
            input: input.into(),
            expected_output_size: None,
            submitter: submitter.into(),
        }
    }
}
