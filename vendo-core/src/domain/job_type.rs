//! Job type domain model
//!
//! Represents an entry in the marketplace catalog: a category of work that
//! providers can offer and users can request.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A category of work known to the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobType {
    /// Unique name of the job type, e.g. `text_generation`
    pub name: String,

    /// Whether demand for this type exists with no provider yet offering it
    ///
    /// Set when the type enters the catalog through user demand and cleared
    /// permanently the first time any provider offers the type.
    pub requested: bool,

    /// Identifiers of the providers currently offering this type
    pub providers: BTreeSet<String>,

    /// Number of jobs submitted under this type so far
    pub request_count: u64,
}

impl JobType {
    /// Creates a catalog entry originating from user demand
    pub fn requested_by_user(name: impl Into<String>) -> Self {
        JobType {
            name: name.into(),
            requested: true,
            providers: BTreeSet::new(),
            request_count: 0,
        }
    }

    /// Creates a catalog entry originating from provider supply
    pub fn offered_by_provider(name: impl Into<String>) -> Self {
        JobType {
            name: name.into(),
            requested: false,
            providers: BTreeSet::new(),
            request_count: 0,
        }
    }

    /// Records that a provider offers this type
    ///
    /// Clears the `requested` flag: once supply exists the demand marker
    /// never comes back, even if the provider set later changes.
    pub fn record_offering(&mut self, provider_id: impl Into<String>) {
        self.providers.insert(provider_id.into());
        self.requested = false;
    }

    /// Records a job submission under this type
    pub fn record_submission(&mut self) {
        self.request_count += 1;
    }

    /// Returns true when no provider currently offers this type
    pub fn is_unserved(&self) -> bool {
        self.providers.is_empty()
    }
}
