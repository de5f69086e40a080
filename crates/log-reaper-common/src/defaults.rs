//! Default limits and naming conventions
//!
//! These constants are the reference configuration; the rate and page size
//! can be overridden from the command line.

/// Maximum number of `DeleteLogGroup` calls started per second
pub const DEFAULT_MAX_DELETES_PER_SECOND: u32 = 5;

/// Largest page size accepted by `ListFunctions` and `DescribeLogGroups`
pub const MAX_PAGE_SIZE: i32 = 50;

/// Log group prefix used by Lambda functions
pub const LAMBDA_LOG_GROUP_PREFIX: &str = "/aws/lambda/";

/// Log group prefix used by CodeBuild projects
pub const CODEBUILD_LOG_GROUP_PREFIX: &str = "/aws/codebuild/";
