//! Job domain model
//!
//! Represents a unit of work submitted by a user and resolved by the
//! dispatch engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A submitted unit of work
///
/// A job starts out `Pending` and is moved to exactly one terminal status by
/// the dispatch engine. Once terminal, a job record never changes again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for the job
    pub id: Uuid,

    /// Name of the job type this job was submitted under
    pub job_type: String,

    /// Opaque input payload supplied by the submitter
    pub input: String,

    /// Optional hint about the expected output size in bytes
    pub expected_output_size: Option<u64>,

    /// Current lifecycle status
    pub status: JobStatus,

    /// Identity of the submitter (an opaque public key)
    pub submitter: String,

    /// When the job was submitted
    pub requested_at: DateTime<Utc>,

    /// When the job reached a terminal status, if it has
    pub resolved_at: Option<DateTime<Utc>>,

    /// Provider the job was assigned to, set only on completion
    pub provider_id: Option<String>,

    /// Output produced by the provider, set only on completion
    pub output: Option<String>,

    /// Failure detail, set when the job ends unassigned or failed
    pub error: Option<String>,
}

impl Job {
    /// Returns true once the job has reached a terminal status
    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Status of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for the dispatch engine to pick the job up
    Pending,

    /// A provider produced an output for the job
    Completed,

    /// No provider offers the job's type, or dispatch timed out
    Unassigned,

    /// The assigned provider was invoked and reported an error
    Failed,
}

impl JobStatus {
    /// Returns true for every status except `Pending`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Unassigned => write!(f, "unassigned"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Terminal outcome the dispatch engine applies to a pending job
///
/// Exactly one outcome is ever applied per job; later attempts are no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JobOutcome {
    /// A provider produced output for the job
    Completed {
        /// Provider that served the job
        provider_id: String,
        /// Output payload the provider returned
        output: String,
    },

    /// No provider could serve the job
    Unassigned {
        /// Human-readable reason the job went unserved
        error: String,
    },

    /// The chosen provider was invoked and reported an error
    Failed {
        /// Error detail reported by the provider
        error: String,
    },
}

impl JobOutcome {
    /// The terminal status this outcome maps to
    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Completed { .. } => JobStatus::Completed,
            JobOutcome::Unassigned { .. } => JobStatus::Unassigned,
            JobOutcome::Failed { .. } => JobStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_not_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Unassigned.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_outcome_maps_to_status() {
        let completed = JobOutcome::Completed {
            provider_id: "pk1".to_string(),
            output: "out".to_string(),
        };
        assert_eq!(completed.status(), JobStatus::Completed);

        let unassigned = JobOutcome::Unassigned {
            error: "no provider".to_string(),
        };
        assert_eq!(unassigned.status(), JobStatus::Unassigned);

        let failed = JobOutcome::Failed {
            error: "boom".to_string(),
        };
        assert_eq!(failed.status(), JobStatus::Failed);
    }
}
