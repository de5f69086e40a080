//! Shared test utilities for log-reaper
//!
//! This crate provides common test helpers that can be used across
//! unit and integration tests without circular dependencies.
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection for tests that talk to real AWS
//! - [`fake`]: In-memory account implementing every listing/delete trait

pub mod aws;
pub mod fake;

// Re-export commonly used items
pub use aws::get_test_region;
pub use fake::{FakeAccount, Listing};
