//! Rate-limited bulk deletion of log groups
//!
//! Every target becomes a task that waits for its admission slot, calls
//! `DeleteLogGroup` exactly once and reports back over a completion channel.
//! A failing (or panicking) delete only marks its own target as failed.

use crate::aws::{ErrorKind, classify_anyhow_error};
use crate::limiter::RateLimiter;
use anyhow::anyhow;
use futures::FutureExt;
use log_reaper_common::LogGroupDeleter;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A log group that could not be deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDeletion {
    pub log_group_name: String,
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FailedDeletion {
    fn new(log_group_name: String, error: &anyhow::Error) -> Self {
        let classified = classify_anyhow_error(error);
        Self {
            log_group_name,
            error: format!("{error:#}"),
            kind: classified.kind(),
            suggestion: classified.suggestion(),
        }
    }
}

/// Outcome of one bulk deletion: `deleted` and `failed` partition the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    pub failed: Vec<FailedDeletion>,
}

impl DeletionReport {
    /// Names of the log groups that failed to delete
    pub fn failed_names(&self) -> Vec<&str> {
        self.failed
            .iter()
            .map(|f| f.log_group_name.as_str())
            .collect()
    }

    /// Number of delete calls made
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

/// Result message sent from a delete task to the collector
struct DeletionOutcome {
    log_group_name: String,
    result: anyhow::Result<()>,
}

/// Deletes log groups through a shared [`RateLimiter`]
pub struct BulkDeleter<D> {
    deleter: Arc<D>,
    limiter: RateLimiter,
}

impl<D> BulkDeleter<D>
where
    D: LogGroupDeleter + 'static,
{
    pub fn new(deleter: Arc<D>, limiter: RateLimiter) -> Self {
        Self { deleter, limiter }
    }

    /// Delete every target, one attempt each, and wait for all of them.
    ///
    /// All targets are submitted up front; the limiter spaces their starts.
    /// The returned report lists each target exactly once, sorted by name.
    pub async fn delete_all(&self, targets: Vec<String>) -> DeletionReport {
        let total = targets.len();
        if total == 0 {
            return DeletionReport::default();
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<DeletionOutcome>();

        for log_group_name in targets {
            let slot = self.limiter.reserve();
            let deleter = Arc::clone(&self.deleter);
            let tx = tx.clone();

            tokio::spawn(async move {
                tokio::time::sleep_until(slot).await;
                debug!(log_group = %log_group_name, "Deleting log group");

                let result = AssertUnwindSafe(deleter.delete_log_group(&log_group_name))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        Err(anyhow!("delete task panicked: {}", panic_message(&*panic)))
                    });

                // The collector outlives every sender
                let _ = tx.send(DeletionOutcome {
                    log_group_name,
                    result,
                });
            });
        }
        drop(tx);

        let mut report = DeletionReport::default();
        while let Some(outcome) = rx.recv().await {
            match outcome.result {
                Ok(()) => {
                    info!(
                        log_group = %outcome.log_group_name,
                        "({}/{}) deleted",
                        report.deleted.len() + 1,
                        total
                    );
                    report.deleted.push(outcome.log_group_name);
                }
                Err(e) => {
                    warn!(
                        log_group = %outcome.log_group_name,
                        error = ?e,
                        "Failed to delete log group"
                    );
                    report
                        .failed
                        .push(FailedDeletion::new(outcome.log_group_name, &e));
                }
            }
        }

        report.deleted.sort();
        report
            .failed
            .sort_by(|a, b| a.log_group_name.cmp(&b.log_group_name));
        report
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log_reaper_test_utils::FakeAccount;
    use std::collections::BTreeSet;
    use std::num::NonZeroU32;
    use std::time::Duration;

    fn deleter(account: FakeAccount, rate: u32) -> (Arc<FakeAccount>, BulkDeleter<FakeAccount>) {
        let account = Arc::new(account);
        let limiter = RateLimiter::per_second(NonZeroU32::new(rate).unwrap());
        (account.clone(), BulkDeleter::new(account, limiter))
    }

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("/aws/lambda/fn-{i:02}")).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input() {
        let (account, bulk) = deleter(FakeAccount::new(), 5);
        let report = bulk.delete_all(Vec::new()).await;
        assert_eq!(report, DeletionReport::default());
        assert!(account.delete_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_succeed() {
        let targets = names(3);
        let (account, bulk) = deleter(FakeAccount::new().with_log_groups(targets.clone()), 5);

        let report = bulk.delete_all(targets.clone()).await;

        assert_eq!(report.deleted, targets);
        assert!(report.failed.is_empty());
        assert!(account.log_groups().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_stop_other_deletes() {
        let targets = names(6);
        let account = FakeAccount::new()
            .with_log_groups(targets.iter().filter(|n| !n.ends_with("04")).cloned())
            .failing_delete("/aws/lambda/fn-01")
            .panicking_delete("/aws/lambda/fn-03");
        let (account, bulk) = deleter(account, 5);

        let report = bulk.delete_all(targets.clone()).await;

        assert_eq!(
            report.failed_names(),
            vec!["/aws/lambda/fn-01", "/aws/lambda/fn-03", "/aws/lambda/fn-04"]
        );
        assert_eq!(
            report.deleted,
            vec!["/aws/lambda/fn-00", "/aws/lambda/fn-02", "/aws/lambda/fn-05"]
        );
        assert_eq!(account.delete_attempts().len(), 6);

        let kinds: Vec<ErrorKind> = report.failed.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::AccessDenied, ErrorKind::Other, ErrorKind::NotFound]
        );
        assert!(report.failed[1].error.contains("panicked"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_ceiling_within_sliding_window() {
        let targets = names(20);
        let account = FakeAccount::new()
            .with_log_groups(targets.clone())
            .with_delete_latency(Duration::from_millis(700));
        let (account, bulk) = deleter(account, 5);

        let report = bulk.delete_all(targets).await;
        assert_eq!(report.deleted.len(), 20);

        let mut starts: Vec<_> = account.delete_calls().iter().map(|c| c.started_at).collect();
        starts.sort();
        assert_eq!(starts.len(), 20);

        // No window of one second may hold more than five starts, so the
        // sixth start after any start is at least one second later.
        for pair in starts.windows(6) {
            assert!(pair[5] - pair[0] >= Duration::from_secs(1));
        }
        // Starts are not held back by slow deletes still in flight.
        assert!(starts[19] - starts[0] < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_admission_follows_submission_order() {
        let targets = names(8);
        let (account, bulk) = deleter(FakeAccount::new().with_log_groups(targets.clone()), 5);

        bulk.delete_all(targets.clone()).await;

        assert_eq!(account.delete_attempts(), targets);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// deleted and failed are disjoint and cover the input exactly
            #[test]
            fn deletion_partitions_targets(
                targets in prop::collection::btree_set("[a-z]{1,6}", 0..25),
                failing in prop::collection::btree_set("[a-z]{1,6}", 0..10),
            ) {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .start_paused(true)
                    .build()
                    .unwrap();

                let mut account = FakeAccount::new().with_log_groups(targets.clone());
                for name in &failing {
                    account = account.failing_delete(name.clone());
                }
                let (_, bulk) = deleter(account, 50);

                let report = runtime.block_on(bulk.delete_all(targets.iter().cloned().collect()));

                let deleted: BTreeSet<String> = report.deleted.iter().cloned().collect();
                let failed: BTreeSet<String> =
                    report.failed_names().into_iter().map(str::to_string).collect();

                prop_assert_eq!(report.attempted(), targets.len());
                prop_assert!(deleted.is_disjoint(&failed));
                prop_assert_eq!(deleted.union(&failed).cloned().collect::<BTreeSet<_>>(), targets.clone());
                prop_assert_eq!(failed, targets.intersection(&failing).cloned().collect::<BTreeSet<_>>());
            }
        }
    }
}
