//! Engine configuration
//!
//! Defines all configurable parameters for the dispatch engine including
//! worker parallelism, invocation timeouts, and the seeded job type catalog.

use std::time::Duration;

use crate::dispatch::policy::SelectionPolicy;

/// Dispatch engine configuration
///
/// All limits and timeouts are configurable to allow tuning for different
/// deployment scenarios (interactive demos vs high-volume embedding).
#[derive(Debug, Clone)]
pub struct Config {
    /// Max parallel dispatch tasks
    pub dispatch_workers: usize,

    /// Maximum time a single provider invocation may take
    ///
    /// Jobs whose invocation exceeds this bound resolve as unassigned.
    pub dispatch_timeout: Duration,

    /// Buffer capacity of the job event channel
    ///
    /// Slow subscribers lose the oldest events once the buffer fills.
    pub event_capacity: usize,

    /// Strategy for choosing among a job type's providers
    pub selection_policy: SelectionPolicy,

    /// Job types placed in the catalog at startup, none of them requested
    pub seed_job_types: Vec<String>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new() -> Self {
        Self {
            dispatch_workers: 4,
            dispatch_timeout: Duration::from_secs(30),
            event_capacity: 1024,
            selection_policy: SelectionPolicy::RoundRobin,
            seed_job_types: Vec::new(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - VENDO_DISPATCH_WORKERS (optional, default: 4)
    /// - VENDO_DISPATCH_TIMEOUT_SECS (optional, seconds, default: 30)
    /// - VENDO_EVENT_CAPACITY (optional, default: 1024)
    /// - VENDO_SELECTION_POLICY (optional, round_robin | least_loaded)
    /// - VENDO_SEED_JOB_TYPES (optional, comma-separated type names)
    pub fn from_env() -> anyhow::Result<Self> {
        let dispatch_workers = std::env::var("VENDO_DISPATCH_WORKERS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(4);

        let dispatch_timeout = std::env::var("VENDO_DISPATCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let event_capacity = std::env::var("VENDO_EVENT_CAPACITY")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1024);

        let selection_policy = match std::env::var("VENDO_SELECTION_POLICY") {
            Ok(value) => value
                .parse::<SelectionPolicy>()
                .map_err(|e| anyhow::anyhow!("VENDO_SELECTION_POLICY: {e}"))?,
            Err(_) => SelectionPolicy::RoundRobin,
        };

        let seed_job_types = std::env::var("VENDO_SEED_JOB_TYPES")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            dispatch_workers,
            dispatch_timeout,
            event_capacity,
            selection_policy,
            seed_job_types,
        })
    }

    /// Sets the job types seeded into the catalog at startup
    pub fn with_seed_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.seed_job_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the provider selection policy
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.dispatch_workers == 0 {
            anyhow::bail!("dispatch_workers must be greater than 0");
        }

        if self.dispatch_timeout.is_zero() {
            anyhow::bail!("dispatch_timeout must be greater than 0");
        }

        if self.event_capacity == 0 {
            anyhow::bail!("event_capacity must be greater than 0");
        }

        if self.seed_job_types.iter().any(|name| name.trim().is_empty()) {
            anyhow::bail!("seed_job_types must not contain empty names");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
