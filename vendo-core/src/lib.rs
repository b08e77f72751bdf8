//! Vendo Core
//!
//! Core types and abstractions for the Vendo compute marketplace.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job, Provider, JobType, Review)
//! - DTOs: Request and summary shapes exchanged with front-ends

pub mod domain;
pub mod dto;
