//! Rating Service
//!
//! Thin façade over the provider registry's rating records, with derived
//! statistics. Holds no state of its own.

use chrono::Utc;
use vendo_core::domain::provider::Rating;
use vendo_core::dto::provider::RatingSummary;

use crate::error::{EngineError, Result};
use crate::store::Stores;

/// Append a rating to a provider's history
pub fn rate_provider(
    stores: &Stores,
    provider_id: &str,
    rating: u8,
    feedback: Option<String>,
) -> Result<()> {
    validate_rating(rating)?;

    let rating = Rating {
        rating,
        feedback,
        created_at: Utc::now(),
    };

    if !stores.providers.add_rating(provider_id, rating) {
        return Err(EngineError::ProviderNotFound(provider_id.to_string()));
    }

    tracing::info!("Provider rated: {}", provider_id);

    Ok(())
}

/// A provider's ratings in append order
///
/// Unknown providers yield an empty list rather than an error, keeping
/// listing operations total.
pub fn provider_ratings(stores: &Stores, provider_id: &str) -> Vec<Rating> {
    stores.providers.ratings_of(provider_id)
}

/// Arithmetic mean of a provider's ratings, zero when none exist
pub fn average_rating(stores: &Stores, provider_id: &str) -> f64 {
    stores.providers.average_rating(provider_id)
}

/// Aggregated rating statistics for a provider
pub fn summarize(stores: &Stores, provider_id: &str) -> RatingSummary {
    match stores.providers.get(provider_id) {
        Some(provider) => RatingSummary {
            average_rating: provider.average_rating(),
            rating_count: provider.ratings.len(),
        },
        None => RatingSummary {
            average_rating: 0.0,
            rating_count: 0,
        },
    }
}

// =============================================================================
// Validation
// =============================================================================

pub(crate) fn validate_rating(rating: u8) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(EngineError::validation("Rating must be between 1 and 5"));
    }

    Ok(())
}
