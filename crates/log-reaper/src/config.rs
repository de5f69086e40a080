//! Configuration types for the reaper

use crate::error::ConfigError;
use log_reaper_common::defaults::{DEFAULT_MAX_DELETES_PER_SECOND, MAX_PAGE_SIZE};
use std::num::NonZeroU32;

/// AWS connection configuration
#[derive(Debug, Clone, Default)]
pub struct AwsConfig {
    /// AWS region (None = SDK default provider chain)
    pub region: Option<String>,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

impl AwsConfig {
    pub fn new(region: Option<String>, aws_profile: Option<String>) -> Result<Self, ConfigError> {
        if region.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(ConfigError::EmptyRegion);
        }
        if aws_profile.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyProfile);
        }
        Ok(Self {
            region,
            aws_profile,
        })
    }
}

/// Limits applied to listing and deletion calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteLimits {
    /// Maximum `DeleteLogGroup` starts per second, shared by both passes
    pub max_deletes_per_sec: NonZeroU32,
    /// Page size for `ListFunctions` and `DescribeLogGroups`
    pub page_size: i32,
}

impl DeleteLimits {
    pub fn new(max_deletes_per_sec: u32, page_size: i32) -> Result<Self, ConfigError> {
        let max_deletes_per_sec =
            NonZeroU32::new(max_deletes_per_sec).ok_or(ConfigError::InvalidDeleteRate)?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidPageSize {
                got: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self {
            max_deletes_per_sec,
            page_size,
        })
    }
}

impl Default for DeleteLimits {
    fn default() -> Self {
        Self {
            max_deletes_per_sec: NonZeroU32::new(DEFAULT_MAX_DELETES_PER_SECOND)
                .unwrap_or(NonZeroU32::MIN),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// How the final report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary blocks
    #[default]
    Table,
    /// Single JSON document
    Json,
}

/// Configuration for a reaper run
#[derive(Debug, Clone, Default)]
pub struct ReaperConfig {
    pub aws: AwsConfig,
    pub limits: DeleteLimits,
    pub output: OutputFormat,
}

impl ReaperConfig {
    pub fn region(&self) -> Option<&str> {
        self.aws.region.as_deref()
    }
    pub fn aws_profile(&self) -> Option<&str> {
        self.aws.aws_profile.as_deref()
    }
}
