//! # Progress Reporting
//!
//! - [`ReportProgress`]: the contract every progress target implements
//! - [`ProgressReportToken`]: stand-alone sink with its own subscribers
//! - [`ProgressTracker`]: per-run accounting that drives the targets

pub mod report;
pub mod token;
pub mod tracker;

pub use report::{ProgressReport, ReportProgress};
pub use token::ProgressReportToken;
pub use tracker::ProgressTracker;
