//! Job type DTOs
//!
//! Data transfer objects for catalog listings.

use serde::{Deserialize, Serialize};

use crate::domain::job_type::JobType;

/// Summary information about a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTypeSummary {
    /// Unique name of the job type
    pub name: String,

    /// Whether demand exists with no provider yet offering the type
    pub requested: bool,

    /// Number of providers currently offering the type
    pub provider_count: usize,

    /// Number of jobs submitted under this type so far
    pub request_count: u64,
}

impl From<&JobType> for JobTypeSummary {
    fn from(job_type: &JobType) -> Self {
        JobTypeSummary {
            name: job_type.name.clone(),
            requested: job_type.requested,
            provider_count: job_type.providers.len(),
            request_count: job_type.request_count,
        }
    }
}
