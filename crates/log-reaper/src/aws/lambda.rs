//! Lambda function listing

use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::{Context, Result};
use aws_sdk_lambda::Client;
use log_reaper_common::{FunctionLister, Page};
use tracing::debug;

/// Lambda client used to enumerate live functions
pub struct LambdaClient {
    client: Client,
}

impl FromAwsContext for LambdaClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.lambda_client(),
        }
    }
}

impl LambdaClient {
    /// List one page of function names (`$LATEST` versions only)
    pub async fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>> {
        let response = self
            .client
            .list_functions()
            .max_items(page_size)
            .set_marker(marker)
            .send()
            .await
            .context("Failed to list Lambda functions")?;

        let items: Vec<String> = response
            .functions()
            .iter()
            .filter_map(|f| f.function_name().map(str::to_string))
            .collect();

        debug!(count = items.len(), "Listed Lambda functions page");

        Ok(Page {
            items,
            next_token: response.next_marker().map(str::to_string),
        })
    }
}

impl FunctionLister for LambdaClient {
    async fn list_functions_page(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<String>> {
        LambdaClient::list_functions_page(self, page_size, marker).await
    }
}
