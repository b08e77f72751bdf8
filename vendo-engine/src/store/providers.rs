//! Provider registry store
//!
//! Handles all provider state: registration records and accumulated
//! ratings. Providers are never deleted.

use chrono::Utc;
use dashmap::DashMap;
use vendo_core::domain::provider::{Provider, Rating};
use vendo_core::dto::provider::ProviderSummary;

/// In-memory provider registry
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: DashMap<String, Provider>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or updates a provider record
    ///
    /// Repeat registrations merge offered job types and replace the
    /// endpoint; ratings and the original registration time survive.
    /// Returns a snapshot of the record after the merge.
    pub fn upsert(&self, provider_id: &str, job_types: &[String], endpoint: &str) -> Provider {
        let mut entry = self
            .providers
            .entry(provider_id.to_string())
            .or_insert_with(|| Provider::new(provider_id, endpoint, Utc::now()));
        entry.merge_registration(job_types.iter().cloned(), endpoint);
        entry.clone()
    }

    /// Appends a rating, returning false when the provider is unknown
    pub fn add_rating(&self, provider_id: &str, rating: Rating) -> bool {
        match self.providers.get_mut(provider_id) {
            Some(mut entry) => {
                entry.add_rating(rating);
                true
            }
            None => false,
        }
    }

    /// Returns a snapshot of a single provider record
    pub fn get(&self, provider_id: &str) -> Option<Provider> {
        self.providers.get(provider_id).map(|entry| entry.clone())
    }

    /// A provider's ratings in append order; empty when unknown
    pub fn ratings_of(&self, provider_id: &str) -> Vec<Rating> {
        self.providers
            .get(provider_id)
            .map(|entry| entry.ratings.clone())
            .unwrap_or_default()
    }

    /// Arithmetic mean of a provider's ratings
    ///
    /// Zero for both unrated and unknown providers, keeping listings total.
    pub fn average_rating(&self, provider_id: &str) -> f64 {
        self.providers
            .get(provider_id)
            .map(|entry| entry.average_rating())
            .unwrap_or(0.0)
    }

    /// Lists all providers as summaries, sorted by identifier
    pub fn list(&self) -> Vec<ProviderSummary> {
        let mut summaries: Vec<ProviderSummary> = self
            .providers
            .iter()
            .map(|entry| ProviderSummary::from(entry.value()))
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true when no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Inserts a fully formed record, replacing any existing one
    pub(crate) fn insert(&self, provider: Provider) {
        self.providers.insert(provider.id.clone(), provider);
    }
}
