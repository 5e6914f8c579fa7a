#![allow(clippy::doc_markdown)] // Allow technical terms like FuturesUnordered in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Tasker Async For
//!
//! Concurrency-limited async `for` and `foreach` loops with progress reporting
//! and aggregated failures.
//!
//! ## Overview
//!
//! A run turns a numeric range or a collection into work items, invokes an
//! async work function for each of them, and completes once every item has
//! finished. Item failures never stop their siblings: they are collected and
//! surfaced together as one [`AggregateError`] at the end of the run.
//!
//! ## Key Features
//!
//! - **Bounded concurrency**: at most `concurrency_limit` items in flight, or
//!   strictly one at a time in synchronous mode
//! - **Progress reporting**: a monotonic completion fraction pushed to any
//!   [`ReportProgress`] sink, with change and completion notifications
//! - **Failure aggregation**: one cause per failed item, with single-cause
//!   aggregates from nested runs unwrapped
//! - **Reusable handles**: [`AsyncFor`] rejects overlapping runs on the same
//!   handle with [`AsyncForError::ConcurrencyGuardViolation`]
//! - **Borrowing work**: items are polled inside the caller's task, so work
//!   closures may borrow local state
//!
//! ## Module Organization
//!
//! - [`api`] - One-shot free functions
//! - [`async_for`] - Reusable handle with its own progress and guard
//! - [`execution`] - Item generators, dispatcher, guard and failure aggregation
//! - [`progress`] - Progress contract, sink token and per-run tracker
//! - [`events`] - Subscriber registry behind progress notifications
//! - [`config`] - Configuration loading
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasker_async_for::{AsyncFor, ExecutionOptions, ProgressReportToken, StepRange};
//! use std::sync::Arc;
//!
//! # async fn example() -> tasker_async_for::Result<()> {
//! tasker_async_for::logging::init_structured_logging();
//!
//! let sink = Arc::new(ProgressReportToken::new());
//! let options = ExecutionOptions::new()
//!     .with_concurrency_limit(8)
//!     .with_progress_sink(sink.clone());
//!
//! tasker_async_for::for_range_with(StepRange::new(0, 100).with_stride(5), options, |i| async move {
//!     println!("processing {i}");
//!     Ok::<(), std::io::Error>(())
//! })
//! .await?;
//! assert!(sink.is_completed());
//!
//! let runner = AsyncFor::new();
//! runner.run_for(0, 10, |_| async { Ok::<(), std::io::Error>(()) }).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod api;
pub mod async_for;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod execution;
pub mod ext;
pub mod logging;
pub mod progress;

pub use api::{for_each, for_each_with, for_range, for_range_with};
pub use async_for::AsyncFor;
pub use config::AsyncForConfig;
pub use error::{AggregateError, AsyncForError, BoxError, ItemPanic, Result};
pub use events::SubscriptionId;
pub use execution::{DispatchMode, ExecutionOptions, GuardState, StepRange, WorkItem};
pub use ext::AsyncForEachExt;
pub use progress::{ProgressReport, ProgressReportToken, ReportProgress};
