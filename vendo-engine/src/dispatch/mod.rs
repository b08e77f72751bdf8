//! Dispatch Module
//!
//! The engine's work queue and worker pool: jobs enter through an unbounded
//! queue at submission time, and a bounded set of worker tasks drains the
//! queue, resolving each job to a terminal state through a provider
//! selection policy.

pub mod events;
pub mod invoker;
pub mod policy;
pub mod worker;

pub use events::{JobEvent, JobEventBus};
pub use invoker::{LoopbackInvoker, ProviderInvoker};
pub use policy::{ProviderSelector, SelectionPolicy};
