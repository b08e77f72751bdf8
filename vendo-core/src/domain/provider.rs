//! Provider domain model
//!
//! Represents a compute provider registered with the marketplace.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A provider that can serve jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Unique identifier for the provider (an opaque public key)
    pub id: String,

    /// Endpoint the provider is reachable at
    ///
    /// Stored verbatim; the marketplace treats it as an opaque string.
    pub endpoint: String,

    /// Job types this provider offers
    pub job_types: BTreeSet<String>,

    /// Ratings received so far, in the order they arrived
    pub ratings: Vec<Rating>,

    /// When this provider was first registered
    pub registered_at: DateTime<Utc>,
}

impl Provider {
    /// Creates a freshly registered provider with no ratings
    pub fn new(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Provider {
            id: id.into(),
            endpoint: endpoint.into(),
            job_types: BTreeSet::new(),
            ratings: Vec::new(),
            registered_at,
        }
    }

    /// Merges a repeat registration into the existing record
    ///
    /// Offered types accumulate across registrations and the endpoint is
    /// replaced with the most recent one. Ratings and the original
    /// registration time are untouched.
    pub fn merge_registration(
        &mut self,
        job_types: impl IntoIterator<Item = String>,
        endpoint: impl Into<String>,
    ) {
        self.job_types.extend(job_types);
        self.endpoint = endpoint.into();
    }

    /// Appends a rating to the provider's history
    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Arithmetic mean of all ratings, or `0.0` when none exist
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.ratings.iter().map(|r| u64::from(r.rating)).sum();
        sum as f64 / self.ratings.len() as f64
    }
}

/// A single rating left for a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Score on the 1..=5 scale
    pub rating: u8,

    /// Optional free-form feedback accompanying the score
    pub feedback: Option<String>,

    /// When the rating was recorded
    pub created_at: DateTime<Utc>,
}
