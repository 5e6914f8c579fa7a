//! # Execution Engine
//!
//! The parts of a run, leaves first:
//!
//! - [`work_items`]: range and collection item generators
//! - [`failures`]: per-item failure collection and aggregation
//! - [`guard`]: single-flight guard for reusable handles
//! - [`options`]: per-run settings and dispatch mode
//! - [`dispatcher`]: the concurrency-limited run loop tying them together

pub mod dispatcher;
pub mod failures;
pub mod guard;
pub mod options;
pub mod work_items;

pub use dispatcher::{execute, ExecutionRequest};
pub use failures::{ErrorAggregator, FailureRecord};
pub use guard::{GuardLease, GuardState, ReentrancyGuard};
pub use options::{DispatchMode, ExecutionOptions};
pub use work_items::{CollectionItems, RangeItems, StepRange, WorkItem};
