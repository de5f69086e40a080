//! Listing and deletion operations consumed by the reaper
//!
//! These traits abstract the AWS SDK calls so the reconciliation logic can
//! be tested without hitting real AWS. The SDK-backed implementations live
//! in the `log-reaper` crate; in-memory fakes live in
//! `log-reaper-test-utils`. Every trait is also implemented for `Arc<T>` so
//! one shared client can serve several roles.

use crate::page::Page;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;

/// Lists Lambda function names (`ListFunctions`).
pub trait FunctionLister: Send + Sync {
    /// Fetch one page of function names.
    ///
    /// `marker` is the cursor returned by the previous page.
    fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> impl Future<Output = Result<Page<String>>> + Send;
}

/// Lists CloudWatch log group names (`DescribeLogGroups`).
pub trait LogGroupLister: Send + Sync {
    /// Fetch one page of log group names, optionally restricted to `prefix`.
    fn list_log_groups_page(
        &self,
        prefix: Option<String>,
        page_size: i32,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<Page<String>>> + Send;
}

/// Lists CodeBuild project names (`ListProjects`).
///
/// The service offers neither a prefix filter nor a page size.
pub trait ProjectLister: Send + Sync {
    /// Fetch one page of project names.
    fn list_projects_page(
        &self,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<Page<String>>> + Send;
}

/// Deletes a CloudWatch log group (`DeleteLogGroup`).
pub trait LogGroupDeleter: Send + Sync {
    /// Delete the named log group.
    ///
    /// Fails if the group does not exist or the caller lacks permission.
    fn delete_log_group(&self, log_group_name: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<T: FunctionLister> FunctionLister for Arc<T> {
    fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> impl Future<Output = Result<Page<String>>> + Send {
        (**self).list_functions_page(page_size, marker)
    }
}

impl<T: LogGroupLister> LogGroupLister for Arc<T> {
    fn list_log_groups_page(
        &self,
        prefix: Option<String>,
        page_size: i32,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<Page<String>>> + Send {
        (**self).list_log_groups_page(prefix, page_size, next_token)
    }
}

impl<T: ProjectLister> ProjectLister for Arc<T> {
    fn list_projects_page(
        &self,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<Page<String>>> + Send {
        (**self).list_projects_page(next_token)
    }
}

impl<T: LogGroupDeleter> LogGroupDeleter for Arc<T> {
    fn delete_log_group(&self, log_group_name: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).delete_log_group(log_group_name)
    }
}
