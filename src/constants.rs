//! # System Constants
//!
//! Names and defaults shared by the execution engine, configuration loading
//! and structured logging.

/// Component name attached to every structured log line
pub const COMPONENT: &str = "async_for";

/// Run lifecycle operations reported through `logging::log_run_operation`
pub mod events {
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_COMPLETED: &str = "run.completed";
    pub const RUN_FAILED: &str = "run.failed";
}

/// Environment variables recognised by configuration and logging
pub mod env {
    /// Prefix for `AsyncForConfig` fields, e.g. `TASKER_ASYNC_FOR_CONCURRENCY_LIMIT`
    pub const CONFIG_PREFIX: &str = "TASKER_ASYNC_FOR";
    pub const ENVIRONMENT_VARS: [&str; 2] = ["TASKER_ENV", "APP_ENV"];
    pub const LOG_FORMAT: &str = "TASKER_LOG_FORMAT";
}

pub mod defaults {
    /// `0` (or any negative value) means no concurrency cap
    pub const CONCURRENCY_LIMIT: i32 = 0;
    pub const RUN_SYNCHRONOUSLY: bool = false;
    pub const STRIDE: i64 = 1;
    pub const ENVIRONMENT: &str = "development";
}
