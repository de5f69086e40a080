//! CodeBuild project listing

use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::{Context, Result};
use aws_sdk_codebuild::Client;
use log_reaper_common::{Page, ProjectLister};
use tracing::debug;

/// CodeBuild client used to enumerate live projects
pub struct CodeBuildClient {
    client: Client,
}

impl FromAwsContext for CodeBuildClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.codebuild_client(),
        }
    }
}

impl CodeBuildClient {
    /// List one page of project names.
    ///
    /// `ListProjects` has no page size or name filter; the service decides
    /// how many names a page holds.
    pub async fn list_projects_page(&self, next_token: Option<String>) -> Result<Page<String>> {
        let response = self
            .client
            .list_projects()
            .set_next_token(next_token)
            .send()
            .await
            .context("Failed to list CodeBuild projects")?;

        let items = response.projects().to_vec();
        debug!(count = items.len(), "Listed CodeBuild projects page");

        Ok(Page {
            items,
            next_token: response.next_token().map(str::to_string),
        })
    }
}

impl ProjectLister for CodeBuildClient {
    async fn list_projects_page(&self, next_token: Option<String>) -> Result<Page<String>> {
        CodeBuildClient::list_projects_page(self, next_token).await
    }
}
