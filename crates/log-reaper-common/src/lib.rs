//! log-reaper-common - Shared types and utilities
//!
//! This crate holds everything the reaper needs that does not talk to AWS
//! directly, so the driver logic can be exercised against in-memory fakes.
//!
//! ## Modules
//!
//! - [`defaults`]: Fixed limits and log group prefixes
//! - [`operations`]: Listing and deletion traits implemented by AWS clients
//! - [`orphans`]: Pure orphan resolution between name sets
//! - [`page`]: Cursor pagination helpers
//! - [`resource_kind`]: Resource kinds that own log groups

pub mod defaults;
pub mod operations;
pub mod orphans;
pub mod page;
pub mod resource_kind;

// Re-export commonly used types
pub use operations::{FunctionLister, LogGroupDeleter, LogGroupLister, ProjectLister};
pub use orphans::{orphaned_log_groups, resources_without_log_group};
pub use page::{Page, collect_pages};
pub use resource_kind::ResourceKind;
