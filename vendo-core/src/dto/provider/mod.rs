//! Provider DTOs
//!
//! Data transfer objects for provider registration and rating queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::provider::Provider;

/// Request to register a provider with the marketplace
///
/// Safe to send repeatedly: offered types accumulate and the endpoint is
/// refreshed on every registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProvider {
    /// Unique identifier for the provider (an opaque public key)
    pub provider_id: String,

    /// Job types this provider offers
    pub job_types: Vec<String>,

    /// Endpoint the provider is reachable at
    pub endpoint: String,
}

/// Summary information about a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// Unique identifier for the provider
    pub id: String,

    /// Endpoint the provider is reachable at
    pub endpoint: String,

    /// Job types this provider offers, sorted by name
    pub job_types: Vec<String>,

    /// Arithmetic mean of the provider's ratings, `0.0` when unrated
    pub average_rating: f64,

    /// Number of ratings received so far
    pub rating_count: usize,

    /// When this provider was first registered
    pub registered_at: DateTime<Utc>,
}

impl From<&Provider> for ProviderSummary {
    fn from(provider: &Provider) -> Self {
        ProviderSummary {
            id: provider.id.clone(),
            endpoint: provider.endpoint.clone(),
            job_types: provider.job_types.iter().cloned().collect(),
            average_rating: provider.average_rating(),
            rating_count: provider.ratings.len(),
            registered_at: provider.registered_at,
        }
    }
}

/// Aggregated rating statistics for a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Arithmetic mean of the provider's ratings, `0.0` when unrated
    pub average_rating: f64,

    /// Number of ratings received so far
    pub rating_count: usize,
}
