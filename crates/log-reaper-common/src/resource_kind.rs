//! Resource kinds that own CloudWatch log groups
//!
//! Each kind writes its logs under a fixed prefix followed by the resource
//! name, which is how ownership is recovered from a log group name.

use crate::defaults::{CODEBUILD_LOG_GROUP_PREFIX, LAMBDA_LOG_GROUP_PREFIX};
use serde::Serialize;

/// Types of AWS resources whose log groups are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Lambda function (`/aws/lambda/<function-name>`)
    LambdaFunction,
    /// CodeBuild project (`/aws/codebuild/<project-name>`)
    #[serde(rename = "codebuild_project")]
    CodeBuildProject,
}

impl ResourceKind {
    /// Reconciliation order: Lambda first, then CodeBuild.
    pub const ALL: [ResourceKind; 2] = [ResourceKind::LambdaFunction, ResourceKind::CodeBuildProject];

    /// Log group name prefix for resources of this kind
    pub fn log_group_prefix(self) -> &'static str {
        match self {
            ResourceKind::LambdaFunction => LAMBDA_LOG_GROUP_PREFIX,
            ResourceKind::CodeBuildProject => CODEBUILD_LOG_GROUP_PREFIX,
        }
    }

    /// Stable identifier used in logs and JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::LambdaFunction => "lambda_function",
            ResourceKind::CodeBuildProject => "codebuild_project",
        }
    }

    /// Human readable plural label for report headings
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::LambdaFunction => "Lambda functions",
            ResourceKind::CodeBuildProject => "CodeBuild projects",
        }
    }

    /// Whether resources lacking a log group are worth listing in the report.
    ///
    /// CodeBuild only creates its log group on the first build, so a project
    /// without one is normal and not reported.
    pub fn reports_missing_log_groups(self) -> bool {
        matches!(self, ResourceKind::LambdaFunction)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
