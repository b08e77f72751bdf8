//! Catalog Service
//!
//! Business logic for job type bookkeeping.

use vendo_core::dto::job_type::JobTypeSummary;

use crate::error::{EngineError, Result};
use crate::store::Stores;

/// Add a job type to the catalog
///
/// Idempotent on the type's existence: re-adding a known type leaves its
/// provider set and request count untouched.
pub fn add_job_type(stores: &Stores, name: &str, requested: bool) -> Result<()> {
    validate_type_name(name)?;

    let inserted = stores.catalog.register(name, requested);

    if inserted {
        tracing::info!("Job type added: {} (requested: {})", name, requested);
    } else {
        tracing::debug!("Job type already known: {}", name);
    }

    Ok(())
}

/// List all catalog entries, sorted by type name
pub fn list_job_types(stores: &Stores) -> Vec<JobTypeSummary> {
    stores.catalog.list()
}

// =============================================================================
// Validation
// =============================================================================

pub(crate) fn validate_type_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EngineError::validation("Job type name cannot be empty"));
    }

    if name.len() > 255 {
        return Err(EngineError::validation(
            "Job type name is too long (max 255 characters)",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_list_job_types() {
        let stores = Stores::new();
        add_job_type(&stores, "text_generation", false).unwrap();
        add_job_type(&stores, "video_generation", true).unwrap();

        let listed = list_job_types(&stores);
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|t| t.name == "video_generation" && t.requested));
    }

    #[test]
    fn test_empty_type_name_is_rejected() {
        let stores = Stores::new();
        let err = add_job_type(&stores, "   ", true).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_overlong_type_name_is_rejected() {
        let stores = Stores::new();
        let name = "x".repeat(256);
        let err = add_job_type(&stores, &name, false).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_re_adding_preserves_counters() {
        let stores = Stores::new();
        add_job_type(&stores, "translation", false).unwrap();
        stores.catalog.record_submission("translation");

        add_job_type(&stores, "translation", true).unwrap();
        let entry = stores.catalog.get("translation").unwrap();
        assert_eq!(entry.request_count, 1);
        assert!(!entry.requested);
    }
}
