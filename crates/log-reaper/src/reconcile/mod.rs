//! Reconciliation driver
//!
//! Runs one pass per [`ResourceKind`], strictly in sequence:
//! enumerate log groups and owners, resolve orphans, delete them, report.
//! Both passes share one [`RateLimiter`], so the delete rate ceiling holds
//! across the whole run.

mod report;

pub use report::{ConsoleSink, PassReport, ReconcileReport, ReportSink};

use crate::aws::{
    AwsContext, CodeBuildClient, FromAwsContext, LambdaClient, LogsClient, get_current_account_id,
};
use crate::config::ReaperConfig;
use crate::deleter::BulkDeleter;
use crate::limiter::RateLimiter;
use anyhow::{Context, Result};
use chrono::Utc;
use log_reaper_common::{
    FunctionLister, LogGroupDeleter, LogGroupLister, ProjectLister, ResourceKind, collect_pages,
    orphaned_log_groups, resources_without_log_group,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Drives the per-kind reconciliation passes
pub struct Reconciler<F, P, L> {
    functions: F,
    projects: P,
    logs: Arc<L>,
    deleter: BulkDeleter<L>,
    page_size: i32,
}

impl<F, P, L> Reconciler<F, P, L>
where
    F: FunctionLister,
    P: ProjectLister,
    L: LogGroupLister + LogGroupDeleter + 'static,
{
    pub fn new(functions: F, projects: P, logs: Arc<L>, limiter: RateLimiter, page_size: i32) -> Self {
        let deleter = BulkDeleter::new(Arc::clone(&logs), limiter);
        Self {
            functions,
            projects,
            logs,
            deleter,
            page_size,
        }
    }

    /// Run the Lambda pass, then the CodeBuild pass.
    ///
    /// Each pass is handed to `sink` before the next one starts. Failed
    /// deletes are part of the reports; an enumeration failure aborts the
    /// run, after the passes that already finished have been reported.
    pub async fn run<S: ReportSink>(&self, sink: &mut S) -> Result<Vec<PassReport>> {
        let mut passes = Vec::with_capacity(ResourceKind::ALL.len());
        for kind in ResourceKind::ALL {
            let pass = self.reconcile(kind).await?;
            sink.pass_finished(&pass)?;
            passes.push(pass);
        }
        Ok(passes)
    }

    /// Run a single pass for `kind`
    pub async fn reconcile(&self, kind: ResourceKind) -> Result<PassReport> {
        let prefix = kind.log_group_prefix();
        info!(kind = %kind, prefix, "Deleting log groups for orphaned {}", kind.label());

        let log_groups = self.list_log_groups(prefix).await?;
        let resources = self.list_resources(kind).await?;

        let without_log_group = resources_without_log_group(&resources, &log_groups, prefix);
        let orphaned = orphaned_log_groups(&log_groups, &resources, prefix);

        info!(
            kind = %kind,
            log_groups = log_groups.len(),
            resources = resources.len(),
            orphaned = orphaned.len(),
            without_log_group = without_log_group.len(),
            "Resolved orphaned log groups"
        );

        let orphaned_count = orphaned.len();
        let deletion = self.deleter.delete_all(orphaned).await;

        info!(
            kind = %kind,
            attempted = deletion.attempted(),
            deleted = deletion.deleted.len(),
            failed = deletion.failed.len(),
            "Pass complete"
        );

        Ok(PassReport {
            kind,
            log_group_prefix: prefix,
            log_groups_scanned: log_groups.len(),
            resources_scanned: resources.len(),
            orphaned: orphaned_count,
            deletion,
            resources_without_log_group: without_log_group,
        })
    }

    async fn list_log_groups(&self, prefix: &str) -> Result<BTreeSet<String>> {
        let names = collect_pages(|token| {
            self.logs
                .list_log_groups_page(Some(prefix.to_string()), self.page_size, token)
        })
        .await
        .with_context(|| format!("Failed to enumerate log groups under {prefix}"))?;

        Ok(names.into_iter().collect())
    }

    async fn list_resources(&self, kind: ResourceKind) -> Result<BTreeSet<String>> {
        let names = match kind {
            ResourceKind::LambdaFunction => {
                collect_pages(|marker| self.functions.list_functions_page(self.page_size, marker))
                    .await
            }
            ResourceKind::CodeBuildProject => {
                collect_pages(|token| self.projects.list_projects_page(token)).await
            }
        }
        .with_context(|| format!("Failed to enumerate {}", kind.label()))?;

        Ok(names.into_iter().collect())
    }
}

/// Connect to AWS, validate credentials and run both passes, reporting each
/// pass to `sink` as it completes.
pub async fn run<S: ReportSink>(config: &ReaperConfig, sink: &mut S) -> Result<ReconcileReport> {
    let started_at = Utc::now();

    let aws = AwsContext::load(config.region(), config.aws_profile()).await?;
    let account_id = get_current_account_id(aws.sdk_config()).await?;

    info!(
        account_id = %account_id,
        region = %aws.region(),
        max_deletes_per_sec = config.limits.max_deletes_per_sec.get(),
        page_size = config.limits.page_size,
        "Starting log group reconciliation"
    );
    sink.run_started(&account_id, aws.region())?;

    let reconciler = Reconciler::new(
        LambdaClient::from_context(&aws),
        CodeBuildClient::from_context(&aws),
        Arc::new(LogsClient::from_context(&aws)),
        RateLimiter::per_second(config.limits.max_deletes_per_sec),
        config.limits.page_size,
    );
    let passes = reconciler.run(sink).await?;

    Ok(ReconcileReport {
        account_id: account_id.to_string(),
        region: aws.region().to_string(),
        started_at,
        finished_at: Utc::now(),
        passes,
    })
}
