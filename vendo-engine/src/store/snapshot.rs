//! Registry snapshots
//!
//! Point-in-time dumps of the full marketplace state, meant for an external
//! store. The engine has no persistence of its own; callers serialize a
//! snapshot however they like and hand it back to restore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vendo_core::domain::job::Job;
use vendo_core::domain::job_type::JobType;
use vendo_core::domain::provider::Provider;
use vendo_core::domain::review::Review;

use crate::store::Stores;

/// Serializable dump of a marketplace's complete state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Catalog entries, sorted by name
    pub job_types: Vec<JobType>,

    /// Provider records, sorted by identifier
    pub providers: Vec<Provider>,

    /// All jobs: resolved ones first in resolution order, then pending ones
    pub jobs: Vec<Job>,

    /// Reviews in insertion order
    pub reviews: Vec<Review>,
}

impl MarketSnapshot {
    /// Total number of records across all sections
    pub fn record_count(&self) -> usize {
        self.job_types.len() + self.providers.len() + self.jobs.len() + self.reviews.len()
    }
}

/// Dumps the stores into a snapshot
pub(crate) fn take(stores: &Stores) -> MarketSnapshot {
    let mut job_types: Vec<JobType> = Vec::with_capacity(stores.catalog.len());
    for summary in stores.catalog.list() {
        if let Some(entry) = stores.catalog.get(&summary.name) {
            job_types.push(entry);
        }
    }

    let mut providers: Vec<Provider> = Vec::with_capacity(stores.providers.len());
    for summary in stores.providers.list() {
        if let Some(record) = stores.providers.get(&summary.id) {
            providers.push(record);
        }
    }

    let mut jobs = stores.jobs.list_resolved();
    for id in stores.jobs.pending_ids() {
        if let Some(job) = stores.jobs.get(&id) {
            jobs.push(job);
        }
    }

    MarketSnapshot {
        taken_at: Utc::now(),
        job_types,
        providers,
        jobs,
        reviews: stores.reviews.list(),
    }
}

/// Rebuilds stores from a snapshot
///
/// Job and review ordering is reconstructed from the snapshot's section
/// ordering, matching what `take` wrote.
pub(crate) fn restore(snapshot: MarketSnapshot) -> Stores {
    let stores = Stores::new();
    for entry in snapshot.job_types {
        stores.catalog.insert(entry);
    }
    for provider in snapshot.providers {
        stores.providers.insert(provider);
    }
    for job in snapshot.jobs {
        stores.jobs.insert(job);
    }
    for review in snapshot.reviews {
        stores.reviews.insert(review);
    }
    stores
}
