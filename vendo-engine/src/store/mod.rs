//! Store Module
//!
//! In-memory data layer for the engine.
//! Each store owns the records for a specific domain entity behind
//! entity-level sharded locks, so concurrent operations on unrelated
//! entities never serialize against each other.

pub mod catalog;
pub mod jobs;
pub mod providers;
pub mod reviews;
pub mod snapshot;

pub use catalog::JobTypeCatalog;
pub use jobs::JobStore;
pub use providers::ProviderRegistry;
pub use reviews::ReviewLedger;
pub use snapshot::MarketSnapshot;

/// The complete in-memory state of one marketplace instance
///
/// Owned behind an `Arc` by the engine handle and its dispatch workers.
/// There is no global instance; every `Stores` is constructed explicitly.
#[derive(Debug, Default)]
pub struct Stores {
    /// Known job types and the providers offering them
    pub catalog: JobTypeCatalog,

    /// Registered providers and their ratings
    pub providers: ProviderRegistry,

    /// Every submitted job, pending or resolved
    pub jobs: JobStore,

    /// Free-form reviews with threaded responses
    pub reviews: ReviewLedger,
}

impl Stores {
    /// Creates empty stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Dumps the complete state as a point-in-time snapshot
    pub fn snapshot(&self) -> MarketSnapshot {
        snapshot::take(self)
    }

    /// Rebuilds stores from a previously taken snapshot
    pub fn from_snapshot(snapshot: MarketSnapshot) -> Self {
        snapshot::restore(snapshot)
    }
}
