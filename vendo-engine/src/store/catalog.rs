//! Job type catalog store
//!
//! Handles all catalog state: which job types exist, who offers them, and
//! how often each has been requested. Every operation locks only the entry
//! it touches.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use vendo_core::domain::job_type::JobType;
use vendo_core::dto::job_type::JobTypeSummary;

/// In-memory job type catalog
#[derive(Debug, Default)]
pub struct JobTypeCatalog {
    types: DashMap<String, JobType>,
}

impl JobTypeCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a type if absent, returning whether an entry was created
    ///
    /// Existing entries are left untouched, so re-registering a type never
    /// resets its provider set or request count.
    pub fn register(&self, name: &str, requested: bool) -> bool {
        match self.types.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let entry = if requested {
                    JobType::requested_by_user(name)
                } else {
                    JobType::offered_by_provider(name)
                };
                slot.insert(entry);
                true
            }
        }
    }

    /// Records that a provider offers a type, creating the entry when missing
    pub fn record_offering(&self, name: &str, provider_id: &str) {
        let mut entry = self
            .types
            .entry(name.to_string())
            .or_insert_with(|| JobType::offered_by_provider(name));
        entry.record_offering(provider_id);
    }

    /// Bumps a type's submission counter, creating the entry when missing
    ///
    /// A submission for an unknown type enters it as requested: demand now
    /// exists without supply.
    pub fn record_submission(&self, name: &str) {
        let mut entry = self
            .types
            .entry(name.to_string())
            .or_insert_with(|| JobType::requested_by_user(name));
        entry.record_submission();
    }

    /// Returns a snapshot of a single entry
    pub fn get(&self, name: &str) -> Option<JobType> {
        self.types.get(name).map(|entry| entry.clone())
    }

    /// Identifiers of the providers offering a type, in stable name order
    ///
    /// Unknown types yield an empty list.
    pub fn providers_of(&self, name: &str) -> Vec<String> {
        self.types
            .get(name)
            .map(|entry| entry.providers.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Lists all entries as summaries, sorted by type name
    pub fn list(&self) -> Vec<JobTypeSummary> {
        let mut summaries: Vec<JobTypeSummary> = self
            .types
            .iter()
            .map(|entry| JobTypeSummary::from(entry.value()))
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true when the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Inserts a fully formed entry, replacing any existing one
    pub(crate) fn insert(&self, entry: JobType) {
        self.types.insert(entry.name.clone(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent_on_existence() {
        let catalog = JobTypeCatalog::new();
        assert!(catalog.register("text_generation", true));
        catalog.record_submission("text_generation");

        // Re-registering must not reset the request count
        assert!(!catalog.register("text_generation", true));
        let entry = catalog.get("text_generation").unwrap();
        assert_eq!(entry.request_count, 1);
    }

    #[test]
    fn test_offering_auto_registers_supply_side() {
        let catalog = JobTypeCatalog::new();
        catalog.record_offering("translation", "pk1");

        let entry = catalog.get("translation").unwrap();
        assert!(!entry.requested);
        assert_eq!(catalog.providers_of("translation"), vec!["pk1"]);
    }

    #[test]
    fn test_submission_auto_registers_demand_side() {
        let catalog = JobTypeCatalog::new();
        catalog.record_submission("video_generation");

        let entry = catalog.get("video_generation").unwrap();
        assert!(entry.requested);
        assert_eq!(entry.request_count, 1);
        assert!(catalog.providers_of("video_generation").is_empty());
    }

    #[test]
    fn test_providers_listed_in_name_order() {
        let catalog = JobTypeCatalog::new();
        catalog.record_offering("text_generation", "pk2");
        catalog.record_offering("text_generation", "pk1");

        assert_eq!(catalog.providers_of("text_generation"), vec!["pk1", "pk2"]);
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let catalog = JobTypeCatalog::new();
        catalog.register("translation", false);
        catalog.register("image_generation", false);

        let names: Vec<String> = catalog.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["image_generation", "translation"]);
    }
}
