//! In-memory AWS account
//!
//! [`FakeAccount`] implements every listing and deletion trait from
//! `log-reaper-common` over plain collections. Listings are paginated the
//! way the real services paginate, deletions mutate the log group set, and
//! every delete start is timestamped on tokio's clock so tests can check the
//! rate ceiling under a paused runtime.

use anyhow::{Result, bail};
use log_reaper_common::{FunctionLister, LogGroupDeleter, LogGroupLister, Page, ProjectLister};
use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// `ListProjects` returns at most 100 names per page
const PROJECTS_PAGE_SIZE: usize = 100;

/// Listing operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    Functions,
    Projects,
    LogGroups,
}

/// A recorded `DeleteLogGroup` call
#[derive(Debug, Clone)]
pub struct DeleteCall {
    pub log_group_name: String,
    pub started_at: Instant,
}

/// In-memory stand-in for the Lambda, CodeBuild and CloudWatch Logs APIs
#[derive(Debug, Default)]
pub struct FakeAccount {
    functions: Vec<String>,
    projects: Vec<String>,
    log_groups: Mutex<BTreeSet<String>>,
    failing_deletes: HashSet<String>,
    panicking_deletes: HashSet<String>,
    failing_listings: HashSet<Listing>,
    delete_latency: Duration,
    delete_calls: Mutex<Vec<DeleteCall>>,
    list_calls: Mutex<Vec<Listing>>,
}

impl FakeAccount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_projects<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_log_groups<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.log_groups).extend(names.into_iter().map(Into::into));
        self
    }

    /// Make `DeleteLogGroup` fail with `AccessDeniedException` for this name
    pub fn failing_delete(mut self, name: impl Into<String>) -> Self {
        self.failing_deletes.insert(name.into());
        self
    }

    /// Make `DeleteLogGroup` panic for this name
    pub fn panicking_delete(mut self, name: impl Into<String>) -> Self {
        self.panicking_deletes.insert(name.into());
        self
    }

    /// Make every call of the given listing fail
    pub fn failing_listing(mut self, listing: Listing) -> Self {
        self.failing_listings.insert(listing);
        self
    }

    /// Hold each delete for `latency` before it completes
    pub fn with_delete_latency(mut self, latency: Duration) -> Self {
        self.delete_latency = latency;
        self
    }

    /// Log groups that currently exist
    pub fn log_groups(&self) -> BTreeSet<String> {
        lock(&self.log_groups).clone()
    }

    /// Every delete call in start order
    pub fn delete_calls(&self) -> Vec<DeleteCall> {
        lock(&self.delete_calls).clone()
    }

    /// Names passed to `DeleteLogGroup`, in start order
    pub fn delete_attempts(&self) -> Vec<String> {
        self.delete_calls()
            .into_iter()
            .map(|c| c.log_group_name)
            .collect()
    }

    /// Every listing call in call order (one entry per page)
    pub fn list_calls(&self) -> Vec<Listing> {
        lock(&self.list_calls).clone()
    }

    fn record_list(&self, listing: Listing) -> Result<()> {
        lock(&self.list_calls).push(listing);
        if self.failing_listings.contains(&listing) {
            bail!("ThrottlingException: Rate exceeded while listing {listing:?}");
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Serve `items[offset..offset + size]` where `offset` is the decoded token.
fn page_of(items: &[String], size: usize, token: Option<String>) -> Result<Page<String>> {
    let offset = match token {
        Some(t) => match t.parse::<usize>() {
            Ok(offset) => offset,
            Err(_) => bail!("InvalidParameterException: bad pagination token {t:?}"),
        },
        None => 0,
    };
    let end = (offset + size.max(1)).min(items.len());
    let slice = items.get(offset..end).unwrap_or_default().to_vec();

    if end < items.len() {
        Ok(Page::with_next(slice, end.to_string()))
    } else {
        Ok(Page::last(slice))
    }
}

impl FunctionLister for FakeAccount {
    async fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>> {
        self.record_list(Listing::Functions)?;
        page_of(&self.functions, page_size.max(1) as usize, marker)
    }
}

impl ProjectLister for FakeAccount {
    async fn list_projects_page(&self, next_token: Option<String>) -> Result<Page<String>> {
        self.record_list(Listing::Projects)?;
        page_of(&self.projects, PROJECTS_PAGE_SIZE, next_token)
    }
}

impl LogGroupLister for FakeAccount {
    async fn list_log_groups_page(
        &self,
        prefix: Option<String>,
        page_size: i32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.record_list(Listing::LogGroups)?;
        let matching: Vec<String> = lock(&self.log_groups)
            .iter()
            .filter(|name| prefix.as_deref().is_none_or(|p| name.starts_with(p)))
            .cloned()
            .collect();
        page_of(&matching, page_size.max(1) as usize, next_token)
    }
}

impl LogGroupDeleter for FakeAccount {
    async fn delete_log_group(&self, log_group_name: &str) -> Result<()> {
        lock(&self.delete_calls).push(DeleteCall {
            log_group_name: log_group_name.to_string(),
            started_at: Instant::now(),
        });

        if !self.delete_latency.is_zero() {
            tokio::time::sleep(self.delete_latency).await;
        }

        if self.panicking_deletes.contains(log_group_name) {
            panic!("injected panic deleting {log_group_name}");
        }
        if self.failing_deletes.contains(log_group_name) {
            bail!("AccessDeniedException: not authorized to delete {log_group_name}");
        }
        if !lock(&self.log_groups).remove(log_group_name) {
            bail!("ResourceNotFoundException: The specified log group does not exist.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log_reaper_common::collect_pages;

    fn names(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}{i:03}")).collect()
    }

    #[tokio::test]
    async fn test_functions_are_paged() {
        let account = FakeAccount::new().with_functions(names("fn-", 120));

        let first = account.list_functions_page(50, None).await.unwrap();
        assert_eq!(first.items.len(), 50);
        assert_eq!(first.next_token.as_deref(), Some("50"));

        let all = collect_pages(|token| account.list_functions_page(50, token))
            .await
            .unwrap();
        assert_eq!(all, names("fn-", 120));
        assert_eq!(account.list_calls().len(), 4);
    }

    #[tokio::test]
    async fn test_log_groups_filtered_by_prefix() {
        let account =
            FakeAccount::new().with_log_groups(["/aws/lambda/a", "/aws/codebuild/b", "/other"]);

        let page = account
            .list_log_groups_page(Some("/aws/lambda/".to_string()), 50, None)
            .await
            .unwrap();
        assert_eq!(page.items, vec!["/aws/lambda/a"]);
        assert!(page.next_token.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_and_reports_missing() {
        let account = FakeAccount::new().with_log_groups(["/aws/lambda/a"]);

        account.delete_log_group("/aws/lambda/a").await.unwrap();
        assert!(account.log_groups().is_empty());

        let err = account.delete_log_group("/aws/lambda/a").await.unwrap_err();
        assert!(err.to_string().contains("ResourceNotFoundException"));
        assert_eq!(account.delete_attempts().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_listing() {
        let account = FakeAccount::new().failing_listing(Listing::Projects);
        assert!(account.list_projects_page(None).await.is_err());
        assert_eq!(account.list_calls(), vec![Listing::Projects]);
    }
}
