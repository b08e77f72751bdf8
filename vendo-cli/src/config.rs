//! Configuration module
//!
//! Handles CLI configuration including the identities used for demo
//! traffic and overrides for the embedded engine.

use anyhow::Result;
use vendo_engine::SelectionPolicy;

/// Job types every fresh marketplace starts with
pub const DEFAULT_SEED_TYPES: [&str; 4] = [
    "text_generation",
    "image_generation",
    "translation",
    "text_to_voice",
];

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Public key attached to submitted jobs and user-authored reviews
    pub user_key: String,

    /// Public key used for provider registrations and review responses
    pub provider_key: String,

    /// Dispatch worker override, engine default when absent
    pub workers: Option<usize>,

    /// Selection policy override, engine default when absent
    pub policy: Option<SelectionPolicy>,
}

impl Config {
    /// Build the engine configuration from the environment plus CLI overrides
    pub fn engine_config(&self) -> Result<vendo_engine::Config> {
        let mut config = vendo_engine::Config::from_env()?;

        if let Some(workers) = self.workers {
            config.dispatch_workers = workers;
        }
        if let Some(policy) = self.policy {
            config.selection_policy = policy;
        }

        Ok(config)
    }

    /// Engine configuration for a fresh marketplace
    ///
    /// Seeds the classic catalog when the environment configured no seed
    /// types of its own. Snapshot loads skip this and keep the saved state.
    pub fn seeded_engine_config(&self) -> Result<vendo_engine::Config> {
        Ok(seed_default_types(self.engine_config()?))
    }
}

/// Fill in the default catalog when no seed types are configured
fn seed_default_types(config: vendo_engine::Config) -> vendo_engine::Config {
    if config.seed_job_types.is_empty() {
        config.with_seed_types(DEFAULT_SEED_TYPES)
    } else {
        config
    }
}
