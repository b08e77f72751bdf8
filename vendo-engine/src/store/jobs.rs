//! Job store
//!
//! Handles all job state. The store owns the single terminal transition per
//! job: `resolve` is a compare-and-set under the job's entry lock, so
//! concurrent dispatch attempts serialize and exactly one wins.

use std::sync::Mutex;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use vendo_core::domain::job::{Job, JobOutcome, JobStatus};
use vendo_core::dto::job::SubmitJob;

/// In-memory job store
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: DashMap<Uuid, Job>,
    /// Identifiers of resolved jobs, in the order their transitions won
    resolved_log: Mutex<Vec<Uuid>>,
}

impl JobStore {
    /// Creates an empty job store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pending job from a submission request
    pub fn create(&self, req: &SubmitJob) -> Job {
        let job = Job {
            id: Uuid::new_v4(),
            job_type: req.job_type.clone(),
            input: req.input.clone(),
            expected_output_size: req.expected_output_size,
            status: JobStatus::Pending,
            submitter: req.submitter.clone(),
            requested_at: Utc::now(),
            resolved_at: None,
            provider_id: None,
            output: None,
            error: None,
        };
        self.jobs.insert(job.id, job.clone());
        job
    }

    /// Returns a snapshot of a single job
    pub fn get(&self, id: &Uuid) -> Option<Job> {
        self.jobs.get(id).map(|entry| entry.clone())
    }

    /// Applies a terminal outcome if and only if the job is still pending
    ///
    /// Returns the resolved job when this call won the transition, `None`
    /// when the job is unknown or someone else already resolved it. The
    /// check and the mutation happen under the job's entry lock.
    pub fn resolve(&self, id: &Uuid, outcome: JobOutcome) -> Option<Job> {
        let mut entry = self.jobs.get_mut(id)?;
        if entry.status.is_terminal() {
            return None;
        }

        entry.status = outcome.status();
        entry.resolved_at = Some(Utc::now());
        match outcome {
            JobOutcome::Completed {
                provider_id,
                output,
            } => {
                entry.provider_id = Some(provider_id);
                entry.output = Some(output);
            }
            JobOutcome::Unassigned { error } | JobOutcome::Failed { error } => {
                entry.error = Some(error);
            }
        }

        let resolved = entry.clone();
        // Entry lock is still held here, so log order matches transition order.
        self.resolved_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(resolved.id);
        Some(resolved)
    }

    /// Lists resolved jobs in the order they resolved
    ///
    /// Every terminal status appears: unassigned and failed jobs stay
    /// visible next to completed ones.
    pub fn list_resolved(&self) -> Vec<Job> {
        let ids: Vec<Uuid> = self
            .resolved_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        ids.iter()
            .filter_map(|id| self.jobs.get(id).map(|entry| entry.clone()))
            .collect()
    }

    /// Identifiers of jobs still waiting for dispatch
    pub fn pending_ids(&self) -> Vec<Uuid> {
        self.jobs
            .iter()
            .filter(|entry| !entry.status.is_terminal())
            .map(|entry| entry.id)
            .collect()
    }

    /// Number of jobs ever created
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true when no job has been created
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Inserts a fully formed job, appending terminal ones to the log
    pub(crate) fn insert(&self, job: Job) {
        if job.status.is_terminal() {
            self.resolved_log
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(job.id);
        }
        self.jobs.insert(job.id, job);
    }
}
