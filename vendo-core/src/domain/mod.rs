//! Core domain types
//!
//! This module contains the core domain structures used across the Vendo
//! marketplace. These types represent the fundamental business entities and
//! are shared between the dispatch engine (for matching and resolution) and
//! front-ends (for display).

pub mod job;
pub mod job_type;
pub mod provider;
pub mod review;
