//! Integration test utilities for the DOI back-office
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
