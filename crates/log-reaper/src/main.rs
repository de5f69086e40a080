//! log-reaper: delete CloudWatch log groups whose Lambda function or
//! CodeBuild project no longer exists
//!
//! Deletion is immediate and irreversible. Individual delete failures are
//! reported but do not change the exit code; failing to enumerate resources
//! does.

use anyhow::Result;
use clap::Parser;
use log_reaper::config::{AwsConfig, DeleteLimits, OutputFormat, ReaperConfig};
use log_reaper::error::ConfigError;
use log_reaper::reconcile::{self, ConsoleSink};
use log_reaper_common::defaults::{DEFAULT_MAX_DELETES_PER_SECOND, MAX_PAGE_SIZE};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_LOG_DIRECTIVES: &str =
    "info,aws_config=warn,aws_smithy_runtime=warn,aws_sdk_cloudwatchlogs=warn";

#[derive(Parser, Debug)]
#[command(name = "log-reaper")]
#[command(about = "Delete CloudWatch log groups orphaned by deleted Lambda functions and CodeBuild projects")]
#[command(version)]
struct Args {
    /// AWS region (defaults to the SDK provider chain)
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long)]
    aws_profile: Option<String>,

    /// Maximum DeleteLogGroup calls started per second, across both passes
    #[arg(long, default_value_t = DEFAULT_MAX_DELETES_PER_SECOND)]
    max_deletes_per_sec: u32,

    /// Page size for function and log group listings (1-50)
    #[arg(long, default_value_t = MAX_PAGE_SIZE)]
    page_size: i32,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl TryFrom<Args> for ReaperConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(Self {
            aws: AwsConfig::new(args.region, args.aws_profile)?,
            limits: DeleteLimits::new(args.max_deletes_per_sec, args.page_size)?,
            output: args.format,
        })
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    // Print main error message
    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    // Print error chain (causes)
    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

/// `RUST_LOG` when set and non-empty, otherwise [`DEFAULT_LOG_DIRECTIVES`]
fn env_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_DIRECTIVES);
    Ok(EnvFilter::try_new(directives)?)
}

fn init_tracing() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();

    // Logs go to stderr; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(rust_log.as_deref())?)
        .init();
    Ok(())
}

async fn run() -> Result<()> {
    init_tracing()?;

    let args = Args::parse();
    let config = ReaperConfig::try_from(args)?;

    // Each pass is printed as soon as it finishes
    let mut sink = ConsoleSink::new(std::io::stdout(), config.output);
    let report = reconcile::run(&config, &mut sink).await?;

    let elapsed = report.finished_at - report.started_at;
    let failed = report.total_failed();
    if failed > 0 {
        warn!(
            failed,
            deleted = report.total_deleted(),
            "Some log groups could not be deleted"
        );
    } else {
        info!(
            deleted = report.total_deleted(),
            elapsed_ms = elapsed.num_milliseconds(),
            "Reconciliation complete"
        );
    }

    Ok(())
}
