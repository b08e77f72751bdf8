//! Dispatch worker
//!
//! Drains the submission queue and resolves each job to a terminal state.
//! Each job runs in its own task; a semaphore bounds how many dispatches
//! are in flight at once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vendo_core::domain::job::{Job, JobOutcome};

use crate::dispatch::events::{JobEvent, JobEventBus};
use crate::dispatch::invoker::ProviderInvoker;
use crate::dispatch::policy::ProviderSelector;
use crate::store::Stores;

/// Shared state the dispatch workers operate on
pub(crate) struct DispatchContext {
    pub(crate) stores: Arc<Stores>,
    pub(crate) selector: ProviderSelector,
    pub(crate) invoker: Arc<dyn ProviderInvoker>,
    pub(crate) bus: JobEventBus,
    pub(crate) timeout: Duration,
}

/// Worker pool that drives jobs out of `pending`
///
/// Each dispatch runs in a supervised task: a panic resolves the job
/// failed instead of leaving it pending.
pub(crate) struct DispatchWorker {
    context: Arc<DispatchContext>,
    semaphore: Arc<Semaphore>,
    max_parallel: usize,
}

impl DispatchWorker {
    /// Creates a worker pool over the shared context
    pub(crate) fn new(context: Arc<DispatchContext>, max_parallel: usize) -> Self {
        let semaphore = Arc::new(Semaphore::new(max_parallel));
        Self {
            context,
            semaphore,
            max_parallel,
        }
    }

    /// Spawns the drain loop; it runs until the queue closes
    pub(crate) fn spawn(self, queue: UnboundedReceiver<Uuid>) -> JoinHandle<()> {
        tokio::spawn(self.run(queue))
    }

    /// Drains the queue, spawning one bounded task per job
    async fn run(self, mut queue: UnboundedReceiver<Uuid>) {
        info!(
            "Starting dispatch worker (max parallel: {})",
            self.max_parallel
        );

        while let Some(job_id) = queue.recv().await {
            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let context = Arc::clone(&self.context);
            tokio::spawn(async move {
                let task = tokio::spawn({
                    let context = Arc::clone(&context);
                    async move { dispatch_job(&context, job_id).await }
                });
                if let Err(e) = task.await {
                    warn!("Dispatch task for job {} panicked: {}", job_id, e);
                    let outcome = JobOutcome::Failed {
                        error: format!("Dispatch task panicked: {}", e),
                    };
                    if let Some(resolved) = context.stores.jobs.resolve(&job_id, outcome) {
                        context.bus.publish(JobEvent::Resolved(resolved));
                    }
                }
                // Permit is automatically released when dropped
                drop(permit);
            });
        }

        // Queue closed: wait for in-flight dispatches before reporting done.
        let _ = self.semaphore.acquire_many(self.max_parallel as u32).await;
        info!("Dispatch worker stopped");
    }
}

/// Resolves a single job to a terminal state
///
/// Idempotent per job: one that already left `pending` is not touched, and
/// when two attempts race, the store's compare-and-set lets exactly one
/// transition win. Only the winner publishes a `Resolved` event.
pub(crate) async fn dispatch_job(context: &DispatchContext, job_id: Uuid) {
    let Some(job) = context.stores.jobs.get(&job_id) else {
        warn!("Dispatch requested for unknown job: {}", job_id);
        return;
    };

    if job.status.is_terminal() {
        debug!("Job {} already resolved, skipping dispatch", job_id);
        return;
    }

    let outcome = compute_outcome(context, &job).await;

    match context.stores.jobs.resolve(&job_id, outcome) {
        Some(resolved) => {
            info!("Job {} resolved: {}", resolved.id, resolved.status);
            context.bus.publish(JobEvent::Resolved(resolved));
        }
        None => {
            debug!("Job {} was resolved concurrently, dropping outcome", job_id);
        }
    }
}

/// Picks a provider and runs the invocation under the configured timeout
async fn compute_outcome(context: &DispatchContext, job: &Job) -> JobOutcome {
    let candidates = context.stores.catalog.providers_of(&job.job_type);
    if candidates.is_empty() {
        return JobOutcome::Unassigned {
            error: format!("No provider available for job type: {}", job.job_type),
        };
    }

    let Some(provider_id) = context.selector.pick(&job.job_type, &candidates) else {
        return JobOutcome::Unassigned {
            error: format!("No provider available for job type: {}", job.job_type),
        };
    };

    let Some(provider) = context.stores.providers.get(&provider_id) else {
        return JobOutcome::Failed {
            error: format!("Selected provider is not registered: {}", provider_id),
        };
    };

    debug!(
        "Dispatching job {} to provider {} ({})",
        job.id, provider_id, job.job_type
    );

    match tokio::time::timeout(context.timeout, context.invoker.invoke(&provider, job)).await {
        Ok(Ok(output)) => JobOutcome::Completed {
            provider_id,
            output,
        },
        Ok(Err(e)) => JobOutcome::Failed {
            error: format!("{:#}", e),
        },
        Err(_) => JobOutcome::Unassigned {
            error: format!(
                "Dispatch timed out after {:?} for job type: {}",
                context.timeout, job.job_type
            ),
        },
    }
}
