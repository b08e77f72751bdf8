//! Vendo Engine
//!
//! An in-memory job dispatch and provider-matching registry for a compute
//! marketplace.
//!
//! The engine tracks job types, providers, ratings, and reviews, and drives
//! every submitted job to a terminal state through a work queue, a bounded
//! worker pool, and a pluggable provider invoker. There is no global
//! instance: construct a [`Marketplace`] handle and pass it to whatever
//! needs one.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use vendo_core::dto::job::SubmitJob;
//! use vendo_core::dto::provider::RegisterProvider;
//! use vendo_engine::{Config, Marketplace};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let market = Marketplace::start(Config::default())?;
//!
//!     market.register_provider(RegisterProvider {
//!         provider_id: "pk1".to_string(),
//!         job_types: vec!["text_generation".to_string()],
//!         endpoint: "https://provider1.com".to_string(),
//!     })?;
//!
//!     let job = market.submit_job(SubmitJob::new("text_generation", "hello", "user_public_key"))?;
//!     let resolved = market.wait_resolved(job.id, Duration::from_secs(5)).await?;
//!     println!("Job finished: {}", resolved.status);
//!
//!     market.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::events::{JobEvent, JobEventBus};
pub use dispatch::invoker::{LoopbackInvoker, ProviderInvoker};
pub use dispatch::policy::SelectionPolicy;
pub use error::{EngineError, Result};
pub use store::snapshot::MarketSnapshot;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use uuid::Uuid;
use vendo_core::domain::job::{Job, JobOutcome};
use vendo_core::domain::provider::{Provider, Rating};
use vendo_core::domain::review::Review;
use vendo_core::dto::job::SubmitJob;
use vendo_core::dto::job_type::JobTypeSummary;
use vendo_core::dto::provider::{ProviderSummary, RatingSummary, RegisterProvider};
use vendo_core::dto::review::{PostResponse, PostReview};

use crate::dispatch::policy::ProviderSelector;
use crate::dispatch::worker::{DispatchContext, DispatchWorker};
use crate::service::{catalog_service, job_service, provider_service, rating_service, review_service};
use crate::store::Stores;

/// Handle to one marketplace instance
///
/// Cheap to clone; all clones share the same state and dispatch queue.
/// Operations are organized into logical groups:
/// - Catalog (add and list job types)
/// - Providers (register, rate, list)
/// - Jobs (submit, look up, wait for resolution)
/// - Reviews (post, respond, list)
/// - Lifecycle (snapshot, shutdown)
#[derive(Clone)]
pub struct Marketplace {
    stores: Arc<Stores>,
    context: Arc<DispatchContext>,
    queue: Arc<Mutex<Option<UnboundedSender<Uuid>>>>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace").finish_non_exhaustive()
    }
}

impl Marketplace {
    /// Starts a marketplace with the in-process loopback invoker
    ///
    /// Must be called within a tokio runtime; the dispatch worker is
    /// spawned immediately.
    pub fn start(config: Config) -> Result<Self> {
        Self::with_invoker(config, Arc::new(LoopbackInvoker::new()))
    }

    /// Starts a marketplace with a custom provider invoker
    ///
    /// This is the seam for wiring real provider transport into dispatch.
    pub fn with_invoker(config: Config, invoker: Arc<dyn ProviderInvoker>) -> Result<Self> {
        Self::launch(config, Arc::new(Stores::new()), invoker)
    }

    /// Starts a marketplace from a previously taken snapshot
    pub fn restore(config: Config, snapshot: MarketSnapshot) -> Result<Self> {
        Self::restore_with_invoker(config, snapshot, Arc::new(LoopbackInvoker::new()))
    }

    /// Starts a marketplace from a snapshot with a custom invoker
    ///
    /// Jobs that were still pending when the snapshot was taken go straight
    /// back on the dispatch queue.
    pub fn restore_with_invoker(
        config: Config,
        snapshot: MarketSnapshot,
        invoker: Arc<dyn ProviderInvoker>,
    ) -> Result<Self> {
        let stores = Arc::new(Stores::from_snapshot(snapshot));
        let marketplace = Self::launch(config, stores, invoker)?;

        let pending = marketplace.stores.jobs.pending_ids();
        if !pending.is_empty() {
            tracing::info!("Re-queueing {} pending job(s) from snapshot", pending.len());
            for job_id in pending {
                marketplace.enqueue(job_id)?;
            }
        }

        Ok(marketplace)
    }

    fn launch(config: Config, stores: Arc<Stores>, invoker: Arc<dyn ProviderInvoker>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;

        for name in &config.seed_job_types {
            catalog_service::add_job_type(&stores, name, false)?;
        }

        let context = Arc::new(DispatchContext {
            stores: Arc::clone(&stores),
            selector: ProviderSelector::new(config.selection_policy),
            invoker,
            bus: JobEventBus::new(config.event_capacity),
            timeout: config.dispatch_timeout,
        });

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let worker = DispatchWorker::new(Arc::clone(&context), config.dispatch_workers).spawn(queue_rx);

        tracing::info!(
            "Marketplace started ({} catalog entries, policy: {})",
            stores.catalog.len(),
            context.selector.policy()
        );

        Ok(Self {
            stores,
            context,
            queue: Arc::new(Mutex::new(Some(queue_tx))),
            worker: Arc::new(Mutex::new(Some(worker))),
        })
    }

    // =============================================================================
    // Catalog
    // =============================================================================

    /// Add a job type to the catalog
    ///
    /// `requested` marks demand-side entries; it stays set until some
    /// provider registers for the type. Re-adding a known type is a no-op.
    pub fn add_job_type(&self, name: &str, requested: bool) -> Result<()> {
        catalog_service::add_job_type(&self.stores, name, requested)
    }

    /// List all catalog entries, sorted by type name
    pub fn list_job_types(&self) -> Vec<JobTypeSummary> {
        catalog_service::list_job_types(&self.stores)
    }

    // =============================================================================
    // Providers
    // =============================================================================

    /// Register a provider, creating catalog entries for its job types
    ///
    /// Upsert semantics: re-registration merges job types and replaces the
    /// endpoint, leaving ratings untouched.
    pub fn register_provider(&self, req: RegisterProvider) -> Result<Provider> {
        provider_service::register_provider(&self.stores, &req)
    }

    /// Get a provider record by identifier
    pub fn get_provider(&self, provider_id: &str) -> Result<Provider> {
        provider_service::get_provider(&self.stores, provider_id)
    }

    /// List all providers, sorted by identifier
    pub fn list_providers(&self) -> Vec<ProviderSummary> {
        provider_service::list_providers(&self.stores)
    }

    /// Append a rating to a provider's history
    pub fn rate_provider(
        &self,
        provider_id: &str,
        rating: u8,
        feedback: Option<String>,
    ) -> Result<()> {
        rating_service::rate_provider(&self.stores, provider_id, rating, feedback)
    }

    /// A provider's ratings in append order; empty when unknown
    pub fn provider_ratings(&self, provider_id: &str) -> Vec<Rating> {
        rating_service::provider_ratings(&self.stores, provider_id)
    }

    /// Arithmetic mean of a provider's ratings, zero when none exist
    pub fn average_rating(&self, provider_id: &str) -> f64 {
        rating_service::average_rating(&self.stores, provider_id)
    }

    /// Aggregated rating statistics for a provider
    pub fn rating_summary(&self, provider_id: &str) -> RatingSummary {
        rating_service::summarize(&self.stores, provider_id)
    }

    // =============================================================================
    // Jobs
    // =============================================================================

    /// Submit a job for dispatch
    ///
    /// Returns the job immediately in `pending` state; dispatch happens on
    /// the worker pool. Watch for the terminal state with [`subscribe`] or
    /// [`wait_resolved`].
    ///
    /// [`subscribe`]: Marketplace::subscribe
    /// [`wait_resolved`]: Marketplace::wait_resolved
    pub fn submit_job(&self, req: SubmitJob) -> Result<Job> {
        // Fail fast once the engine has been shut down
        if self.queue.lock().unwrap_or_else(|e| e.into_inner()).is_none() {
            return Err(EngineError::QueueClosed);
        }

        let job = job_service::submit_job(&self.stores, &req)?;
        self.context.bus.publish(JobEvent::Submitted(job.clone()));

        if let Err(e) = self.enqueue(job.id) {
            // Shutdown raced the submission; resolve the orphan so it does
            // not sit pending forever.
            let outcome = JobOutcome::Unassigned {
                error: "Dispatcher stopped before the job could be dispatched".to_string(),
            };
            if let Some(resolved) = self.stores.jobs.resolve(&job.id, outcome) {
                self.context.bus.publish(JobEvent::Resolved(resolved));
            }
            return Err(e);
        }

        Ok(job)
    }

    /// Get a job by identifier
    pub fn get_job(&self, job_id: Uuid) -> Result<Job> {
        job_service::get_job(&self.stores, job_id)
    }

    /// List resolved jobs in resolution order, every terminal status included
    pub fn list_resolved(&self) -> Vec<Job> {
        job_service::list_resolved(&self.stores)
    }

    /// Wait until a job resolves, up to `wait`
    ///
    /// Returns the resolved job, or [`EngineError::WaitTimeout`] when the
    /// bound elapses first.
    pub async fn wait_resolved(&self, job_id: Uuid, wait: Duration) -> Result<Job> {
        // Subscribe before the status check so a resolution landing between
        // the two cannot be missed.
        let mut events = self.context.bus.subscribe();

        let job = job_service::get_job(&self.stores, job_id)?;
        if job.status.is_terminal() {
            return Ok(job);
        }

        let listen = async {
            loop {
                match events.recv().await {
                    Ok(JobEvent::Resolved(job)) if job.id == job_id => return Some(job),
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        // Events were dropped; the store still has the truth
                        if let Some(job) = self.stores.jobs.get(&job_id) {
                            if job.status.is_terminal() {
                                return Some(job);
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        };

        match tokio::time::timeout(wait, listen).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) | Err(_) => Err(EngineError::WaitTimeout(job_id)),
        }
    }

    // =============================================================================
    // Reviews
    // =============================================================================

    /// Post a new review
    pub fn add_review(&self, req: PostReview) -> Result<Review> {
        review_service::add_review(&self.stores, &req)
    }

    /// Append a response to an existing review's thread
    pub fn respond_to_review(&self, review_id: Uuid, req: PostResponse) -> Result<()> {
        review_service::respond_to_review(&self.stores, review_id, &req)
    }

    /// List all reviews with their responses, in insertion order
    pub fn list_reviews(&self) -> Vec<Review> {
        review_service::list_reviews(&self.stores)
    }

    // =============================================================================
    // Events & Lifecycle
    // =============================================================================

    /// Open a subscription to job lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.context.bus.subscribe()
    }

    /// Dump the complete state as a point-in-time snapshot
    pub fn snapshot(&self) -> MarketSnapshot {
        self.stores.snapshot()
    }

    /// Close the dispatch queue and wait for in-flight jobs to finish
    ///
    /// Jobs already queued are still dispatched before the worker stops.
    /// Further submissions fail with [`EngineError::QueueClosed`]; read
    /// accessors keep working. Safe to call more than once.
    pub async fn shutdown(&self) {
        let sender = self.queue.lock().unwrap_or_else(|e| e.into_inner()).take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let handle = self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!("Dispatch worker task panicked during shutdown: {}", e);
            }
        }

        tracing::info!("Marketplace shut down");
    }

    fn enqueue(&self, job_id: Uuid) -> Result<()> {
        let queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        match queue.as_ref() {
            Some(sender) => sender.send(job_id).map_err(|_| EngineError::QueueClosed),
            None => Err(EngineError::QueueClosed),
        }
    }
}
