//! Provider invocation
//!
//! The seam between dispatch and actual provider transport. The engine
//! ships an in-process loopback implementation; deployments that talk to
//! real providers supply their own.

use anyhow::Result;
use async_trait::async_trait;
use vendo_core::domain::job::Job;
use vendo_core::domain::provider::Provider;

/// Service trait for running a job against a chosen provider
#[async_trait]
pub trait ProviderInvoker: Send + Sync {
    /// Runs `job` against `provider` and returns the output payload
    ///
    /// An error marks the job failed. Invocations that outlive the engine's
    /// dispatch timeout are abandoned and the job resolves unassigned.
    async fn invoke(&self, provider: &Provider, job: &Job) -> Result<String>;
}

/// In-process invoker that fabricates an output without any transport
pub struct LoopbackInvoker {}

impl LoopbackInvoker {
    /// Creates a new loopback invoker
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LoopbackInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderInvoker for LoopbackInvoker {
    async fn invoke(&self, _provider: &Provider, job: &Job) -> Result<String> {
        Ok(format!("Simulated output for {} job", job.job_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vendo_core::domain::job::JobStatus;

    #[tokio::test]
    async fn test_loopback_output_names_the_job_type() {
        let provider = Provider::new("pk1", "https://provider1.com", Utc::now());
        let job = Job {
            id: Uuid::new_v4(),
            job_type: "translation".to_string(),
            input: "bonjour".to_string(),
            expected_output_size: None,
            status: JobStatus::Pending,
            submitter: "user_public_key".to_string(),
            requested_at: Utc::now(),
            resolved_at: None,
            provider_id: None,
            output: None,
            error: None,
        };

        let output = LoopbackInvoker::new().invoke(&provider, &job).await.unwrap();
        assert_eq!(output, "Simulated output for translation job");
    }
}
