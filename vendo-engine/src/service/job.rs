//! Job Service
//!
//! Business logic for job submission and lookup. Moving a job out of
//! `pending` is the dispatch module's business, never this one's.

use uuid::Uuid;
use vendo_core::domain::job::Job;
use vendo_core::dto::job::SubmitJob;

use crate::error::{EngineError, Result};
use crate::service::catalog;
use crate::store::Stores;

/// Create a pending job and record demand for its type
///
/// Submission is synchronous and never fails for well-formed input. The
/// returned job is still `pending`; the caller hands it to the dispatch
/// queue.
pub fn submit_job(stores: &Stores, req: &SubmitJob) -> Result<Job> {
    // Validate request
    validate_submit_request(req)?;

    // Record demand before the job exists, so the type is never missing
    stores.catalog.record_submission(&req.job_type);
    let job = stores.jobs.create(req);

    tracing::info!("Job submitted: {} ({})", job.id, job.job_type);

    Ok(job)
}

/// Get a job by ID
pub fn get_job(stores: &Stores, id: Uuid) -> Result<Job> {
    stores.jobs.get(&id).ok_or(EngineError::JobNotFound(id))
}

/// List resolved jobs in resolution order
///
/// Includes every terminal status: unassigned and failed jobs stay visible
/// next to completed ones.
pub fn list_resolved(stores: &Stores) -> Vec<Job> {
    stores.jobs.list_resolved()
}

// =============================================================================
// Validation
// =============================================================================

fn validate_submit_request(req: &SubmitJob) -> Result<()> {
    catalog::validate_type_name(&req.job_type)?;

    if req.submitter.trim().is_empty() {
        return Err(EngineError::validation("Submitter cannot be empty"));
    }

    Ok(())
}
