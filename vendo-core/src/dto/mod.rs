//! Data Transfer Objects for the marketplace surface
//!
//! This module contains the request and summary shapes exchanged between the
//! dispatch engine and its front-ends (CLI, tests, embedding applications).
//! DTOs are lightweight representations of domain entities optimized for
//! display and submission.

pub mod job;
pub mod job_type;
pub mod provider;
pub mod review;
