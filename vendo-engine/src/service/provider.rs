//! Provider Service
//!
//! Business logic for provider registration and lookup.

use vendo_core::domain::provider::Provider;
use vendo_core::dto::provider::{ProviderSummary, RegisterProvider};

use crate::error::{EngineError, Result};
use crate::service::catalog;
use crate::store::Stores;

/// Register a provider with the marketplace
///
/// This creates a new provider entry or updates an existing one. Repeat
/// registrations merge offered job types and replace the endpoint. Every
/// offered type is recorded in the catalog, creating entries as needed and
/// clearing their requested flag.
pub fn register_provider(stores: &Stores, req: &RegisterProvider) -> Result<Provider> {
    // Validate request
    validate_register_request(req)?;

    // Upsert the record first so the catalog never points at an unknown provider
    let provider = stores
        .providers
        .upsert(&req.provider_id, &req.job_types, &req.endpoint);

    for job_type in &req.job_types {
        stores.catalog.record_offering(job_type, &req.provider_id);
    }

    tracing::info!(
        "Provider registered: {} ({} job type(s))",
        provider.id,
        provider.job_types.len()
    );

    Ok(provider)
}

/// Get a provider by ID
pub fn get_provider(stores: &Stores, provider_id: &str) -> Result<Provider> {
    stores
        .providers
        .get(provider_id)
        .ok_or_else(|| EngineError::ProviderNotFound(provider_id.to_string()))
}

/// List all providers, sorted by identifier
pub fn list_providers(stores: &Stores) -> Vec<ProviderSummary> {
    stores.providers.list()
}

// =============================================================================
// Validation
// =============================================================================

fn validate_register_request(req: &RegisterProvider) -> Result<()> {
    if req.provider_id.trim().is_empty() {
        return Err(EngineError::validation("Provider ID cannot be empty"));
    }

    if req.provider_id.len() > 255 {
        return Err(EngineError::validation(
            "Provider ID is too long (max 255 characters)",
        ));
    }

    for job_type in &req.job_types {
        catalog::validate_type_name(job_type)?;
    }

    Ok(())
}
