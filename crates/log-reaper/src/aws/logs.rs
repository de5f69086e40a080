//! CloudWatch Logs log group listing and deletion

use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::{Context, Result};
use aws_sdk_cloudwatchlogs::Client;
use log_reaper_common::{LogGroupDeleter, LogGroupLister, Page};
use tracing::debug;

/// CloudWatch Logs client for enumerating and deleting log groups
pub struct LogsClient {
    client: Client,
}

impl FromAwsContext for LogsClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.logs_client(),
        }
    }
}

impl LogsClient {
    /// List one page of log group names, optionally restricted to `prefix`
    pub async fn list_log_groups_page(
        &self,
        prefix: Option<String>,
        page_size: i32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        let response = self
            .client
            .describe_log_groups()
            .limit(page_size)
            .set_log_group_name_prefix(prefix)
            .set_next_token(next_token)
            .send()
            .await
            .context("Failed to describe log groups")?;

        let items: Vec<String> = response
            .log_groups()
            .iter()
            .filter_map(|g| g.log_group_name().map(str::to_string))
            .collect();

        debug!(count = items.len(), "Listed log groups page");

        Ok(Page {
            items,
            next_token: response.next_token().map(str::to_string),
        })
    }

    /// Delete a log group and every stream and event it holds
    pub async fn delete_log_group(&self, log_group_name: &str) -> Result<()> {
        self.client
            .delete_log_group()
            .log_group_name(log_group_name)
            .send()
            .await
            .with_context(|| format!("Failed to delete log group {log_group_name}"))?;

        Ok(())
    }
}

impl LogGroupLister for LogsClient {
    async fn list_log_groups_page(
        &self,
        prefix: Option<String>,
        page_size: i32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        LogsClient::list_log_groups_page(self, prefix, page_size, next_token).await
    }
}

impl LogGroupDeleter for LogsClient {
    async fn delete_log_group(&self, log_group_name: &str) -> Result<()> {
        LogsClient::delete_log_group(self, log_group_name).await
    }
}
