//! AWS client modules for the reaper
//!
//! This module provides wrappers around AWS SDK clients for:
//! - CloudWatch Logs: log group listing and deletion
//! - Lambda: function listing
//! - CodeBuild: project listing
//! - STS: Account ID lookup

pub mod account;
pub mod codebuild;
pub mod context;
pub mod error;
pub mod lambda;
pub mod logs;

// Core clients
pub use account::{AccountId, get_current_account_id};
pub use codebuild::CodeBuildClient;
pub use context::{AwsContext, FromAwsContext};
pub use lambda::LambdaClient;
pub use logs::LogsClient;

// Error handling
pub use error::{AwsError, ErrorKind, classify_anyhow_error, classify_aws_error};
