//! AWS error classification and handling
//!
//! Provides typed errors for AWS SDK operations using the `.code()` method
//! instead of string matching on Debug format.

use serde::Serialize;
use thiserror::Error;

/// AWS error categories used when reporting failed deletions
#[derive(Debug, Clone, Error)]
pub enum AwsError {
    /// Resource was not found (already deleted by someone else)
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Caller lacks permission for the operation
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// A conflicting operation on the same resource is in progress
    #[error("Conflicting operation in progress")]
    OperationAborted,

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

/// Coarse error category, serialized into reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    Throttled,
    OperationAborted,
    Other,
}

impl AwsError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AwsError::NotFound { .. } => ErrorKind::NotFound,
            AwsError::AccessDenied { .. } => ErrorKind::AccessDenied,
            AwsError::Throttled => ErrorKind::Throttled,
            AwsError::OperationAborted => ErrorKind::OperationAborted,
            AwsError::Sdk { .. } => ErrorKind::Other,
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            AwsError::AccessDenied { .. } => suggestion_for_code("AccessDeniedException"),
            AwsError::Throttled => suggestion_for_code("ThrottlingException"),
            AwsError::OperationAborted => suggestion_for_code("OperationAbortedException"),
            AwsError::Sdk { code: Some(c), .. } => suggestion_for_code(c),
            _ => None,
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["ResourceNotFoundException"];

/// Known AWS error codes for permission failures
const ACCESS_DENIED_CODES: &[&str] = &["AccessDeniedException", "AccessDenied"];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "TooManyRequestsException",
    "LimitExceededException",
    "RequestLimitExceeded",
];

/// Known AWS error codes for concurrent modification
const ABORTED_CODES: &[&str] = &["OperationAbortedException"];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if ABORTED_CODES.contains(&c) => AwsError::OperationAborted,
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain using `ProvideErrorMetadata` to extract `.code()` and
/// `.message()` from the SDK errors this crate produces. Falls back to string
/// matching on the Debug representation if no typed error is found.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    use aws_sdk_cloudwatchlogs::error::ProvideErrorMetadata;

    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<AwsError>() {
            return e.clone();
        }
        if let Some(e) = cause.downcast_ref::<aws_sdk_cloudwatchlogs::error::SdkError<
            aws_sdk_cloudwatchlogs::operation::delete_log_group::DeleteLogGroupError,
        >>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<aws_sdk_cloudwatchlogs::error::SdkError<
            aws_sdk_cloudwatchlogs::operation::describe_log_groups::DescribeLogGroupsError,
        >>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<aws_sdk_lambda::error::SdkError<
            aws_sdk_lambda::operation::list_functions::ListFunctionsError,
        >>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<aws_sdk_codebuild::error::SdkError<
            aws_sdk_codebuild::operation::list_projects::ListProjectsError,
        >>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_aws_error(meta.code(), meta.message());
        }
    }

    // Fallback: extract error code from debug string representation
    let debug_str = format!("{:?}", error);
    if let Some(code) = extract_error_code(&debug_str) {
        return classify_aws_error(Some(&code), Some(&error.to_string()));
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    let known = NOT_FOUND_CODES
        .iter()
        .chain(ACCESS_DENIED_CODES)
        .chain(THROTTLING_CODES)
        .chain(ABORTED_CODES);
    for code in known {
        if debug_str.contains(code) {
            return Some((*code).to_string());
        }
    }

    // Try to extract any code from `code: Some("...")` pattern
    if let Some(start) = debug_str.find("code: Some(\"") {
        let rest = &debug_str[start + 12..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    None
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "AccessDeniedException",
        "Grant logs:DeleteLogGroup on the log group to the calling identity.",
    ),
    (
        "ThrottlingException",
        "AWS API rate limit hit. Lower --max-deletes-per-sec and run again.",
    ),
    (
        "OperationAbortedException",
        "Another operation on this log group is in progress. Run again later.",
    ),
    (
        "InvalidParameterException",
        "The log group name was rejected by CloudWatch Logs.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}
