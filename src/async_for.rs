//! # Reusable Async For Handle
//!
//! [`AsyncFor`] runs range and collection loops with its own progress state,
//! subscribers and configuration. Runs on one handle are strictly
//! sequential: starting a run while another is in flight on the same handle
//! fails with [`crate::AsyncForError::ConcurrencyGuardViolation`] and leaves the
//! in-flight run untouched.

use crate::config::AsyncForConfig;
use crate::error::{BoxError, Result};
use crate::events::SubscriptionId;
use crate::execution::dispatcher::{self, ExecutionRequest};
use crate::execution::{
    CollectionItems, ExecutionOptions, GuardState, ReentrancyGuard, StepRange, WorkItem,
};
use crate::progress::{ProgressReport, ProgressReportToken, ReportProgress};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// Reusable async for/foreach runner
///
/// The handle is itself a progress target: [`progress`](Self::progress),
/// [`is_completed`](Self::is_completed) and the handle's subscribers follow
/// each run. Work closures may borrow the handle to read its progress.
///
/// ```rust
/// use tasker_async_for::AsyncFor;
///
/// # async fn example() -> tasker_async_for::Result<()> {
/// let runner = AsyncFor::new();
/// runner.set_message("Indexing files");
/// runner.set_concurrency_limit(4);
/// runner.on_progress_changed(|report| println!("{}: {:.0}%", report.message, report.progress * 100.0));
///
/// runner
///     .run_for_each(vec!["a.txt", "b.txt"], |path| async move {
///         println!("indexing {path}");
///         Ok::<(), std::io::Error>(())
///     })
///     .await?;
///
/// assert!(runner.is_completed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AsyncFor {
    progress: ProgressReportToken,
    guard: ReentrancyGuard,
    concurrency_limit: AtomicI32,
    run_synchronously: AtomicBool,
}

impl AsyncFor {
    pub fn new() -> Self {
        Self::from_config(&AsyncForConfig::default())
    }

    pub fn from_config(config: &AsyncForConfig) -> Self {
        let progress = ProgressReportToken::new();
        if let Some(message) = &config.message {
            progress.set_message(message.clone());
        }

        Self {
            progress,
            guard: ReentrancyGuard::new(),
            concurrency_limit: AtomicI32::new(config.concurrency_limit),
            run_synchronously: AtomicBool::new(config.run_synchronously),
        }
    }

    pub fn message(&self) -> String {
        self.progress.message()
    }

    /// Raises a progress-changed notification
    pub fn set_message(&self, message: impl Into<String>) {
        self.progress.set_message(message);
    }

    /// Maximum in-flight items for runs without explicit options; `<= 0` means unbounded
    pub fn concurrency_limit(&self) -> i32 {
        self.concurrency_limit.load(Ordering::Acquire)
    }

    pub fn set_concurrency_limit(&self, concurrency_limit: i32) {
        self.concurrency_limit
            .store(concurrency_limit, Ordering::Release);
    }

    pub fn run_synchronously(&self) -> bool {
        self.run_synchronously.load(Ordering::Acquire)
    }

    pub fn set_run_synchronously(&self, run_synchronously: bool) {
        self.run_synchronously
            .store(run_synchronously, Ordering::Release);
    }

    /// Options built from the handle's current configuration
    pub fn options(&self) -> ExecutionOptions {
        ExecutionOptions::new()
            .synchronous(self.run_synchronously())
            .with_concurrency_limit(self.concurrency_limit())
    }

    pub fn progress(&self) -> f32 {
        self.progress.progress()
    }

    pub fn is_indeterminate(&self) -> bool {
        self.progress.is_indeterminate()
    }

    pub fn is_completed(&self) -> bool {
        self.progress.is_completed()
    }

    pub fn is_running(&self) -> bool {
        self.guard.is_running()
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    pub fn on_progress_changed<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ProgressReport) + Send + Sync + 'static,
    {
        self.progress.on_progress_changed(handler)
    }

    pub fn remove_progress_changed(&self, id: SubscriptionId) -> bool {
        self.progress.remove_progress_changed(id)
    }

    pub fn on_completed<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.progress.on_completed(handler)
    }

    pub fn remove_completed(&self, id: SubscriptionId) -> bool {
        self.progress.remove_completed(id)
    }

    /// Run `work` for every index in `start..end`, using the handle's configuration
    pub async fn run_for<F, Fut, E>(&self, start: i64, end: i64, work: F) -> Result<()>
    where
        F: FnMut(i64) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        self.run_for_range_with(StepRange::new(start, end), self.options(), work)
            .await
    }

    pub async fn run_for_range<F, Fut, E>(&self, range: StepRange, work: F) -> Result<()>
    where
        F: FnMut(i64) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        self.run_for_range_with(range, self.options(), work).await
    }

    /// Fails with `InvalidArgument` for a zero stride before the guard is taken
    pub async fn run_for_range_with<F, Fut, E>(
        &self,
        range: StepRange,
        options: ExecutionOptions,
        work: F,
    ) -> Result<()>
    where
        F: FnMut(i64) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        let items = range.into_items()?;
        let _lease = self.guard.try_acquire()?;
        self.dispatch(items, &options, work).await
    }

    /// Run `work` for every element of `collection`, using the handle's configuration
    pub async fn run_for_each<I, F, Fut, E>(&self, collection: I, work: F) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        self.run_for_each_with(collection, self.options(), work)
            .await
    }

    /// The collection is only consumed once the guard has been taken
    pub async fn run_for_each_with<I, F, Fut, E>(
        &self,
        collection: I,
        options: ExecutionOptions,
        work: F,
    ) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        let _lease = self.guard.try_acquire()?;
        self.dispatch(CollectionItems::new(collection), &options, work)
            .await
    }

    async fn dispatch<It, T, F, Fut, E>(
        &self,
        items: It,
        options: &ExecutionOptions,
        work: F,
    ) -> Result<()>
    where
        It: ExactSizeIterator<Item = WorkItem<T>>,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: Into<BoxError>,
    {
        let mut targets = vec![self as &dyn ReportProgress];
        targets.extend(
            options
                .progress_sink
                .as_deref()
                .map(|sink| sink as &dyn ReportProgress),
        );

        dispatcher::execute(ExecutionRequest {
            items,
            work,
            mode: options.dispatch_mode(),
            targets,
        })
        .await
    }
}

impl Default for AsyncFor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportProgress for AsyncFor {
    fn progress(&self) -> f32 {
        self.progress.progress()
    }

    fn set_progress(&self, progress: f32) {
        self.progress.set_progress(progress);
    }

    fn message(&self) -> String {
        self.progress.message()
    }

    fn set_message(&self, message: String) {
        self.progress.set_message(message);
    }

    fn is_indeterminate(&self) -> bool {
        self.progress.is_indeterminate()
    }

    fn set_indeterminate(&self, is_indeterminate: bool) {
        self.progress.set_indeterminate(is_indeterminate);
    }

    fn is_completed(&self) -> bool {
        self.progress.is_completed()
    }

    fn set_completed(&self, is_completed: bool) {
        self.progress.set_completed(is_completed);
    }

    fn restart(&self) {
        self.progress.restart();
    }

    fn snapshot(&self) -> ProgressReport {
        self.progress.snapshot()
    }
}
