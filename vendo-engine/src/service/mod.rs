//! Service Module
//!
//! Business logic layer for the engine.
//! Services validate requests, orchestrate between stores, and contain
//! domain logic. Dispatch itself lives in the dispatch module.

pub mod catalog;
pub mod job;
pub mod provider;
pub mod rating;
pub mod review;

// Re-export for convenience
pub use catalog as catalog_service;
pub use job as job_service;
pub use provider as provider_service;
pub use rating as rating_service;
pub use review as review_service;
