//! log-reaper - CloudWatch log group garbage collector
//!
//! This crate finds log groups left behind by deleted Lambda functions and
//! CodeBuild projects and deletes them under a global rate ceiling.

pub mod aws;
pub mod config;
pub mod deleter;
pub mod error;
pub mod limiter;
pub mod reconcile;
